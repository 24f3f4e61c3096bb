use measure_core::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("=== Unit Conversions ===\n");

    let s = "-".repeat(50);

    println!("Test 1: Same Dimension");
    println!("{}", s);
    show(1.0, "meter", "meter");
    show(12.0, "inches", "feet");
    show(1.5, "feet", "inch");
    show(4.4, "lbs", "kilograms");
    show(2.5, "bombers", "floz");

    println!("\n");

    println!("Test 2: Target Before Source");
    println!("{}", s);
    let mut conversion = Conversion::new();
    let result = conversion
        .set_target("feet")
        .and_then(|c| c.set_source(29.0, "inches"))
        .and_then(|c| c.compute_display());
    report("29 inches", result);

    println!("\n");

    println!("Test 3: Rejected Requests");
    println!("{}", s);
    let mut conversion = Conversion::new();
    let result = conversion
        .set_source(None::<f64>, "feet")
        .and_then(|c| c.set_target("inch"))
        .and_then(|c| c.compute_display());
    report("(no amount) feet", result);
    show(2.0, "Frozbozz", "kg");
    show(10.0, "bombers", "feet");

    println!("\n");

    println!("Test 4: Known Units");
    println!("{}", s);
    for dimension in Dimension::ALL {
        println!("{} (reference: {})", dimension, dimension.reference_unit());
        for unit in dimension.units() {
            let aliases: Vec<&str> = unit.aliases().collect();
            println!(
                "  {:<12} x{:<10.6} {}",
                unit.name(),
                unit.normalization_factor(),
                aliases.join(", ")
            );
        }
    }
}

fn show(amount: f64, from: &str, to: &str) {
    let mut conversion = Conversion::new();
    let result = conversion
        .set_source(amount, from)
        .and_then(|c| c.set_target(to))
        .and_then(|c| c.compute_display());
    report(&format!("{amount} {from}"), result);
}

fn report(label: &str, result: Result<DisplayMeasurement, ConversionError>) {
    match result {
        Ok(measurement) => println!("{label} = {measurement}"),
        Err(e) => println!("❌ {label}: {e}"),
    }
}
