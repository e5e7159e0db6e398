mod auction;
mod lifecycle;

pub use {
    auction::*,
    lifecycle::*,
};
