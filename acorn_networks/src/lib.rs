extern crate strum;

use include_flate::*;
use std::slice::Iter;
use std::str::FromStr;
pub use strum::ParseError;
use strum_macros::Display;
use strum_macros::EnumString;

flate!(pub static TINY: str from "networks/tiny.json");
flate!(pub static CHAIN: str from "networks/chain.json");
flate!(pub static SPRINKLER: str from "networks/sprinkler.json");
flate!(pub static CANCER: str from "networks/cancer.json");
flate!(pub static ASIA: str from "networks/asia.json");

#[derive(Debug, PartialEq, Clone, Copy, EnumString, Display)]
pub enum Specification {
    #[strum(ascii_case_insensitive)]
    Tiny,
    #[strum(ascii_case_insensitive)]
    Chain,
    #[strum(ascii_case_insensitive)]
    Sprinkler,
    #[strum(ascii_case_insensitive)]
    Cancer,
    #[strum(ascii_case_insensitive)]
    Asia,
}

impl Specification {
    pub fn iterator() -> Iter<'static, Specification> {
        use Specification::*;
        // NOTE: this is hand-sorted by variable size (smallest-to-largest)
        static SPECIFICATIONS: [Specification; 5] = [Tiny, Chain, Sprinkler, Cancer, Asia];
        SPECIFICATIONS.iter()
    }

    // from_str with better errors
    pub fn _from_str(s: &str) -> Result<Specification, String> {
        match Specification::from_str(s) {
            Ok(s) => Ok(s),
            Err(ParseError::VariantNotFound) => Err(format!(
                "Got: {}, Expected one of: {}",
                s,
                Specification::iterator()
                    .map(|s| format!("{}", s).to_lowercase())
                    .collect::<Vec<String>>()
                    .join(", ")
            )),
        }
    }

    /// The network description, as JSON.
    pub fn json(&self) -> &str {
        use Specification::*;
        match self {
            Tiny => &TINY,
            Chain => &CHAIN,
            Sprinkler => &SPRINKLER,
            Cancer => &CANCER,
            Asia => &ASIA,
        }
    }

    pub fn size(&self) -> usize {
        use Specification::*;
        match self {
            Tiny => 2,
            Chain => 4,
            Sprinkler => 4,
            Cancer => 5,
            Asia => 8,
        }
    }
}
