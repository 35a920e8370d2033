pub mod alias_loader;
pub mod boundary_fetcher;
pub mod dataset_loader;
