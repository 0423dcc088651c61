mod dataset_config;

pub use dataset_config::DatasetConfig;
