use measure_core::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pass a `.toml` or `.json` config path as the first argument to override defaults.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("measure_core=debug".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ConversionConfig::from_file(path)?,
        None => ConversionConfig::default(),
    };

    println!("=== Rounding: {} places, {:?} ===\n", config.decimal_places(), config.rounding());

    let mut conversion = Conversion::with_config(config);
    for (amount, from, to) in [
        (29.0, Unit::Inch, Unit::Foot),
        (1.0, Unit::Kilogram, Unit::Ounce),
        (3.0, Unit::Pint, Unit::Bomber),
        (0.125, Unit::Meter, Unit::Meter),
    ] {
        conversion.set_source_unit(amount, from).set_target_unit(to);
        println!(
            "{amount} {from} -> {} (raw {:.6}, ratio {:.6})",
            conversion.compute_display()?,
            conversion.compute_unrounded()?,
            conversion.ratio()?
        );
    }

    Ok(())
}
