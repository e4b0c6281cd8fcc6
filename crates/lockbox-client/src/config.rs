use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    pub address: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    #[serde(default = "default_setup_route")]
    pub setup: String,
    #[serde(default = "default_home_route")]
    pub home: String,
}

fn default_setup_route() -> String {
    "/auth".into()
}

fn default_home_route() -> String {
    "/".into()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            setup: default_setup_route(),
            home: default_home_route(),
        }
    }
}

impl ClientConfig {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.executor.address.trim().is_empty() {
            return Err(anyhow::anyhow!("executor address missing"));
        }
        for (name, route) in [("setup", &self.routes.setup), ("home", &self.routes.home)] {
            if !route.starts_with('/') {
                return Err(anyhow::anyhow!(format!(
                    "{name} route must start with '/': {route}"
                )));
            }
        }
        if self.routes.setup == self.routes.home {
            return Err(anyhow::anyhow!("setup and home routes must differ"));
        }
        Ok(())
    }
}
