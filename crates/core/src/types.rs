/// Local beer identifier, taken from field 0 of an input line.
pub type BeerId = i64;
