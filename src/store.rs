use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use crate::allocation::Worker;
use crate::parser::ParseError;

/// Reads the worker roster from `id,name,email` CSV data, keeping file
/// order. The roster is treated as read-only everywhere downstream.
pub fn read_workers<R: Read>(reader: R) -> Result<Vec<Worker>, ParseError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut workers = Vec::new();
    for result in csv_reader.deserialize() {
        let worker: Worker = result?;
        workers.push(worker);
    }
    Ok(workers)
}

/// Loads the worker roster from a CSV file on disk.
pub fn load_workers_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Worker>, ParseError> {
    let file = File::open(path)?;
    read_workers(file)
}
