pub mod error;

pub mod service {
    pub mod config_service;
    pub mod docling;
    pub mod writer;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod models {
    pub mod conversion;
    pub mod format;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
    pub mod shell;
}

pub mod utils {
    pub mod browser;
    pub mod utils;
}
