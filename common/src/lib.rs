#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::upper_case_acronyms)]

pub mod address;
pub mod dcdt;
pub mod serializer;
