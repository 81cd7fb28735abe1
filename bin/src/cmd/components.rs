//! Component listing command implementation.

use barometer::IndexKind;
use barometer::combine::{Weighting, default_composites};
use barometer::signals::components::all_components;
use barometer::signals::registry::{SourceKind, series_by_source};

/// List input series, components and composite weights.
pub(crate) fn list_components(verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Series and Components                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for (source, title) in [(SourceKind::Market, "Market series"), (SourceKind::Macro, "Macro series")] {
        println!("{title}:");
        println!("{}", "-".repeat(60));
        for info in series_by_source(source) {
            let flag = if info.critical { "" } else { " (optional)" };
            if verbose {
                println!("  {:14} - {}{flag}", info.id, info.description);
            } else {
                println!("  {}{flag}", info.id);
            }
        }
        println!();
    }

    let components = all_components();
    for composite in default_composites() {
        let kind: IndexKind = composite.index;
        println!("{kind} ({}):", kind.column());
        println!("{}", "-".repeat(60));
        for name in composite.inputs() {
            let weight = match composite.weighting {
                Weighting::Fixed(weights) => weights
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map_or_else(String::new, |(_, w)| format!("{w:.2}")),
                Weighting::Equal(names) => format!("1/{}", names.len()),
            };
            let spec = components.iter().find(|c| c.name == name);
            match spec {
                Some(spec) if verbose => {
                    println!("  {name:18} {weight:>6}  {}", spec.description);
                }
                _ => println!("  {name:18} {weight:>6}"),
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for descriptions.\n");
    }
}
