use std::path::Path;

use simd_load_verify::error::error_count;
use simd_load_verify::lattice::{ConversionLattice, validate_lattice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeFormat {
    Text,
    Json,
    Dot,
}

impl LatticeFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "dot" => Ok(Self::Dot),
            other => Err(format!(
                "unknown format '{other}', expected 'text', 'json', or 'dot'"
            )),
        }
    }
}

pub fn run(config_path: Option<&Path>, format: LatticeFormat) -> Result<(), Box<dyn std::error::Error>> {
    let lattice = super::load_config(config_path)?.lattice();

    match format {
        LatticeFormat::Text => render_text(&lattice),
        LatticeFormat::Json => println!("{}", serde_json::to_string_pretty(&lattice)?),
        LatticeFormat::Dot => print!("{}", lattice.to_dot()),
    }

    let violations = validate_lattice(&lattice);
    let errors = error_count(&violations);
    if format == LatticeFormat::Text {
        for v in &violations {
            println!("{v}");
        }
    }
    if errors == 0 {
        Ok(())
    } else {
        Err(format!("Conversion lattice has {errors} error(s)").into())
    }
}

fn render_text(lattice: &ConversionLattice) {
    println!("Conversion Lattice");
    println!("==================");
    println!("Edges: {}  Depth: {}", lattice.edges().len(), lattice.depth());
    println!();
    for lane in lattice.lanes() {
        let chain: Vec<_> = lattice.chain(lane).iter().map(|s| s.name()).collect();
        println!("  {lane} <- {}", chain.join(", "));
    }
    println!();
}
