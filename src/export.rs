use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::allocation::Allocation;

fn write_entries<W: Write>(
    wtr: &mut Writer<W>,
    allocation: &Allocation,
) -> Result<(), csv::Error> {
    wtr.write_record(["Date", "Worker"])?;
    for entry in &allocation.entries {
        wtr.write_record([entry.date.as_str(), entry.worker.as_str()])?;
    }
    Ok(())
}

/// Renders the allocation as a two-column Date,Worker CSV, in allocator
/// order, for the browser download.
pub fn allocation_to_csv(allocation: &Allocation) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut wtr = Writer::from_writer(Vec::new());
    write_entries(&mut wtr, allocation)?;
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Writes the allocation CSV to a file (CLI mode).
pub fn write_allocation_csv<P: AsRef<Path>>(
    allocation: &Allocation,
    path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = Writer::from_path(path)?;
    write_entries(&mut wtr, allocation)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationEntry;

    #[test]
    fn renders_header_and_entries_in_order() {
        let allocation = Allocation {
            entries: vec![
                AllocationEntry {
                    date: "2024-01-01".to_string(),
                    worker: "Alice".to_string(),
                },
                AllocationEntry {
                    date: "2024-01-02".to_string(),
                    worker: "Unassigned".to_string(),
                },
            ],
        };

        let bytes = allocation_to_csv(&allocation).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "Date,Worker\n2024-01-01,Alice\n2024-01-02,Unassigned\n"
        );
    }

    #[test]
    fn empty_allocation_renders_header_only() {
        let allocation = Allocation { entries: vec![] };

        let bytes = allocation_to_csv(&allocation).unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "Date,Worker\n");
    }
}
