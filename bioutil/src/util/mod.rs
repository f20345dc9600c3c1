pub mod codon;
pub mod dna;
pub mod ids;
pub mod tabbed;
pub mod tally;
