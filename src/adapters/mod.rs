// Adapters layer: concrete implementations of the domain ports.
// `memory` is the headless widget/page used by the CLI and tests; the HTTP
// availability source lives in core::availability.

pub mod memory;
