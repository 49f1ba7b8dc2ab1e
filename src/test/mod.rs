mod loss_config;
mod source_registry;
