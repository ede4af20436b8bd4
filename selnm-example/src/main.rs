use std::error::Error;

use selnm_core::{equal, DenseMatrix, IndexedList, Matrix, SelnmError};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let species = build_species_list()?;
    print!("{}", species);
    log::info!("Loaded {} species into \"{}\"", species.len(), species.name());

    println!("oxygen: {}", species.get_by_id("oxygen")?);
    // "argon" was never added, so this lookup reports KeyNotFound.
    match species.get_by_id("argon") {
        Ok(mass) => println!("argon: {}", mass),
        Err(err) => log::warn!("{}", err),
    }

    let a = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    let b = DenseMatrix::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    let ab = a.matmul(&b)?;
    let ba = b.matmul(&a)?;
    println!("A*B {:?}: {:?}", ab.dims(), ab.data());
    println!("B*A {:?}: {:?}", ba.dims(), ba.data());

    // Scaling round trip should land back on A within rounding.
    let scaled = (&a * 3.0) / 3.0;
    log::info!("(A*3)/3 == A within 1e-12: {}", equal(&scaled, &a, Some(1e-12)));

    if let Err(err) = a.matmul(&ab) {
        match err {
            SelnmError::IncompatibleShape { .. } => log::info!("Rejected product: {}", err),
            other => return Err(other.into()),
        }
    }

    Ok(())
}

fn build_species_list() -> Result<IndexedList<f64>, SelnmError> {
    let mut species = IndexedList::new("species", "Molar mass (g/mol)");
    species.add("hydrogen", 1.008)?;
    species.add("helium", 4.0026)?;
    species.add("nitrogen", 14.007)?;
    species.add("oxygen", 15.999)?;
    Ok(species)
}
