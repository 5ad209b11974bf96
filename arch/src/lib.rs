pub mod tag;
pub mod word;

pub use tag::AddrType;
pub use word::Word;
