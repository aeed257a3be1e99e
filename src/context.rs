use crate::api::ClassifierClient;
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub verbose: u8,
    pub paths: AppPaths,
    pub settings: Settings,
    pub classifier: ClassifierClient,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(
        profile: String,
        json: bool,
        verbose: u8,
        api_url: Option<String>,
    ) -> AppResult<Self> {
        let profile = config::resolve_profile(&profile)?;
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &profile, api_url.as_deref())?;
        let classifier =
            ClassifierClient::new(settings.api_base_url(), settings.request_timeout()?)?;
        let output = Output::new(json);

        Ok(Self {
            profile,
            verbose,
            paths,
            settings,
            classifier,
            output,
        })
    }
}
