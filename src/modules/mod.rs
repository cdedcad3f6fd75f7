pub(crate) mod classifier;
pub(crate) mod feature_extractor;
pub(crate) mod smoother;
