//! Simple decoder to inspect `.iop` object pool files.

use std::path::PathBuf;

use ddop_pool::codec::{CompatibilityLevel, decode_pool, read_iop_file};
use ddop_pool::tree::project;
use ddop_pool::{DiagnosticLog, ObjectBody, ObjectPool, ddi};

fn describe(pool: &ObjectPool, id: u16) -> String {
    let Some(object) = pool.get_by_id(id) else {
        return format!("<missing {id}>");
    };
    match &object.body {
        ObjectBody::Device(device) => format!(
            "Device \"{}\" NAME={:#018x} serial=\"{}\"",
            object.designator, device.iso_name, device.serial_number
        ),
        ObjectBody::Element(element) => format!(
            "Element \"{}\" ({:?}, number {})",
            object.designator, element.kind, element.element_number
        ),
        ObjectBody::ProcessData(data) => format!(
            "ProcessData \"{}\" DDI {} ({})",
            object.designator,
            data.ddi,
            ddi::name(data.ddi).unwrap_or("unknown")
        ),
        ObjectBody::Property(property) => format!(
            "Property \"{}\" DDI {} = {}",
            object.designator, property.ddi, property.value
        ),
        ObjectBody::Presentation(presentation) => format!(
            "Presentation \"{}\" scale {} offset {} decimals {}",
            object.designator, presentation.scale, presentation.offset, presentation.decimals
        ),
    }
}

fn main() {
    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pool.iop".to_string())
        .into();

    println!("Reading: {}", path.display());
    let bytes = read_iop_file(&path).expect("Failed to read file");
    println!("File size: {} bytes", bytes.len());

    let mut log = DiagnosticLog::new();
    let pool = decode_pool(&bytes, 0, CompatibilityLevel::Version4, &mut log)
        .expect("Failed to decode");

    println!("\n=== Objects ({}) ===", pool.len());
    for node in project(&pool) {
        println!(
            "{:indent$}[{}] {}",
            "",
            node.id,
            describe(&pool, node.id),
            indent = node.depth * 2
        );
    }

    if !log.is_empty() {
        println!("\n=== Diagnostics ===");
        for line in log.iter() {
            println!("{:?}: {}", line.level, line.message);
        }
    }
}
