mod normalize;

pub use normalize::DescriptionCleaner;
