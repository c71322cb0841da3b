use anyhow::Result;

use crate::context::AppContext;

pub fn init(context: &AppContext) -> Result<()> {
    let path = context.config_service.path().display();
    if context.config_service.init_default()? {
        println!("Created {}", path);
    } else {
        println!("{} already exists", path);
    }
    Ok(())
}

pub fn show(context: &AppContext) -> Result<()> {
    print!("{}", toml::to_string_pretty(&context.config)?);
    Ok(())
}

pub fn set_config_url(context: &AppContext, url: Option<String>) -> Result<()> {
    context
        .config_service
        .update(|config| config.server.config_url = url.clone())?;

    match url {
        Some(url) => println!("Server links will be fetched from {}", url),
        None => println!("Server links will be read from the configuration file"),
    }
    Ok(())
}
