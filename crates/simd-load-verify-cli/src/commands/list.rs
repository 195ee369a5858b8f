use simd_load_verify::suite::registry;
use simd_load_verify::vector::Backend;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let entries = registry();
    for backend in Backend::ALL {
        println!(
            "{backend} (vector alignment {})",
            backend.vector_alignment()
        );
        for entry in entries.iter().filter(|e| e.descriptor.backend == backend) {
            println!("  {}", entry.descriptor);
        }
    }
    println!("\n{} vector type(s)", entries.len());
    Ok(())
}
