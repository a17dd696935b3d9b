// Persistence of the annotation ledger

mod csv;

pub use self::csv::*;
