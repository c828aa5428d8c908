// Domain layer: journal records, column mapping and normalization. No file or archive access here.

pub mod model;
pub mod ports;

pub mod services;
