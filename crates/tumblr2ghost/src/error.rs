#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tumblr2ghost_core::Error),

    #[error("Network error: {0}")]
    Network(String),
}
