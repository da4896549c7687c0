pub mod delivery;
pub mod dom;
pub mod inflight;
pub mod product;

pub use delivery::{CheckoutElements, DeliveryResolver, DEFAULT_SHIPPING_TIMEOUT};
pub use dom::{Element, Handle, MemoryElement};
pub use inflight::{InFlight, InFlightGuard};
pub use product::{ProductElements, SubmitDecision, VariantPill, VariantResolver};
