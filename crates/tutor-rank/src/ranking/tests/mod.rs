mod common;
mod signals;
mod validation;
