use std::str::FromStr;

#[derive(serde::Deserialize)]
pub(crate) struct Config {
    pub reader_config: chatdigest_monitor::Config,
    pub bot_config: chatdigest_bot::Config,
    #[serde(default)]
    pub ai_config: chatdigest_ai::Config,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Verbose logging plus one run right after startup.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ScheduleConfig {
    #[serde(default = "default_summary_hour")]
    pub summary_hour: u32,
    #[serde(default)]
    pub summary_minute: u32,
    /// Six-field cron expression; overrides `summary_hour`/`summary_minute`.
    #[serde(default)]
    pub cron: Option<String>,
    #[serde(default = "default_days_to_collect")]
    pub days_to_collect: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            summary_hour: default_summary_hour(),
            summary_minute: 0,
            cron: None,
            days_to_collect: default_days_to_collect(),
        }
    }
}

impl ScheduleConfig {
    pub fn cron_expression(&self) -> String {
        match &self.cron {
            Some(expression) if !expression.trim().is_empty() => expression.trim().to_string(),
            _ => format!("0 {} {} * * *", self.summary_minute, self.summary_hour),
        }
    }

    pub fn schedule(&self) -> anyhow::Result<cron::Schedule> {
        let expression = self.cron_expression();
        cron::Schedule::from_str(&expression)
            .map_err(|e| anyhow::anyhow!("invalid cron expression {expression:?}: {e}"))
    }
}

fn default_summary_hour() -> u32 {
    23
}

fn default_days_to_collect() -> u32 {
    1
}

impl Config {
    pub fn load() -> Result<Config, config::ConfigError> {
        let env_config = config::Environment::default()
            .separator("__")
            .list_separator(";")
            .with_list_parse_key("reader_config.channel_ids")
            .with_list_parse_key("reader_config.thread_ids")
            .try_parsing(true);

        let mut conf_builder = config::Config::builder().add_source(env_config);

        if std::path::Path::new("Settings.toml").exists() {
            conf_builder = conf_builder.add_source(config::File::with_name("./Settings.toml"));
        }

        conf_builder.build()?.try_deserialize::<Config>()
    }

    /// Checks that need more than one key, done once at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        let reader = &self.reader_config;
        if reader.channel_ids.is_empty() && reader.guild_id.as_deref().is_none_or(str::is_empty) {
            anyhow::bail!("configure reader_config.channel_ids or reader_config.guild_id");
        }

        if self.schedule.cron.is_none()
            && (self.schedule.summary_hour > 23 || self.schedule.summary_minute > 59)
        {
            anyhow::bail!(
                "invalid summary time {}:{:02}",
                self.schedule.summary_hour,
                self.schedule.summary_minute
            );
        }

        Ok(())
    }
}
