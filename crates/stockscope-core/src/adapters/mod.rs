mod synthetic;
mod yahoo;

pub use synthetic::SyntheticSource;
pub use yahoo::YahooAdapter;
