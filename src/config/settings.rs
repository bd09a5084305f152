use log::warn;

/// The governing body's year: 365.2425 days
pub const EVALUATION_YEAR_SECS: i64 = 31_556_952;

pub struct RatingSettings {
    pub window_secs: i64,
    pub outlier_floor_points: f64,
    pub outlier_std_devs: f64,
    pub bonus_min_rounds: usize,
    pub bonus_divisor: usize,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            window_secs: EVALUATION_YEAR_SECS,
            outlier_floor_points: 100.0,
            outlier_std_devs: 2.5,
            bonus_min_rounds: 8,
            bonus_divisor: 4,
        }
    }
}

pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 500,
            // The site rejects obvious bot user agents
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
                .to_string(),
            timeout_secs: 30,
            base_url: "https://www.pdga.com".to_string(),
        }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub scraper: ScraperSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            scraper: ScraperSettings::default(),
        }
    }

    /// Defaults, with `PDGA_BASE_URL` and `PDGA_RATE_LIMIT_MS` applied when set
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(base_url) = std::env::var("PDGA_BASE_URL") {
            config.scraper.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(raw) = std::env::var("PDGA_RATE_LIMIT_MS") {
            match raw.parse() {
                Ok(ms) => config.scraper.rate_limit_ms = ms,
                Err(_) => warn!("Ignoring PDGA_RATE_LIMIT_MS={}: not a number", raw),
            }
        }

        config
    }
}
