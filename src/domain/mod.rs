// Domain layer: calendar models and the ports to the widget library, the page and the booking API.

pub mod model;
pub mod ports;
