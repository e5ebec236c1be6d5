//! Allocate command implementation.

use crate::cli::AllocateArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::system::{load_system, save_system};
use relia_allocate::{Allocator, ArincReference};
use relia_domain::NodeId;

/// Execute the allocate command.
///
/// The parent's allocation record supplies the method and goal. Targets are
/// only written when every child allocates successfully.
pub fn execute_allocate(args: AllocateArgs, formatter: &Formatter) -> Result<String> {
    let mut tree = load_system(&args.file)?;
    let parent = NodeId::new(args.parent);
    let allocator = if args.first_child_reference {
        Allocator::with_arinc_reference(ArincReference::FirstChild)
    } else {
        Allocator::new()
    };

    let records = if args.write {
        let records = allocator.apply(&mut tree, parent)?;
        save_system(&args.file, &tree)?;
        records
    } else {
        allocator.allocate_children(&tree, parent)?
    };
    formatter.format_allocations(&records)
}
