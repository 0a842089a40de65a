/// Pricing layer: the persisted regression artifact and the gateway that
/// turns user input into a displayable estimate.
///
/// The gateway never surfaces an error to its caller: a missing model or a
/// failed prediction comes back as a descriptive string, so the interactive
/// session cannot crash on a bad input.

pub mod artifact;
pub mod gateway;

pub use artifact::PriceModel;
pub use gateway::{FeatureRecord, PredictionGateway};
