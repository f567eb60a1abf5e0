mod presenter_factory;
mod schema_adapter_factory;
mod serializer_factory;

pub use presenter_factory::{PresenterFactory, PresenterType};
pub use schema_adapter_factory::SchemaAdapterFactory;
pub use serializer_factory::SerializerFactory;
