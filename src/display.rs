use crate::allocation::{Allocation, UNASSIGNED};

/// Prints the allocation in a readable format.
pub fn print_allocation(allocation: &Allocation) {
    println!("\n=== Shift Allocation ===");
    println!("Days allocated: {}", allocation.entries.len());

    let unassigned = allocation.unassigned_count();
    if unassigned > 0 {
        println!("⚠️  Days without an assignee: {}", unassigned);
    }

    println!();
    for entry in &allocation.entries {
        if entry.worker == UNASSIGNED {
            println!("  {} -> [UNASSIGNED]", entry.date);
        } else {
            println!("  {} -> {}", entry.date, entry.worker);
        }
    }
}
