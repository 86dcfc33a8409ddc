pub mod appwrite;
pub mod interface;
pub mod memory;

pub use interface::AccountProvider;

pub fn make_provider(
    config: &crate::config::Config,
) -> ::anyhow::Result<::std::sync::Arc<dyn AccountProvider>> {
    match config.store_interface {
        crate::config::StoreInterface::Appwrite => Ok(::std::sync::Arc::new(
            appwrite::AppwriteAccounts::new(config)?,
        )),
        crate::config::StoreInterface::Memory => {
            ::log::info!("Using in-memory account provider");
            Ok(::std::sync::Arc::new(memory::MemoryAccounts::new()))
        }
    }
}
