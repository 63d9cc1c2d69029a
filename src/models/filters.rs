#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub languages: Vec<String>,
    pub activity_days: u32,
    // accepted from the frontend but not turned into a search qualifier;
    // health is a derived metric the provider knows nothing about
    #[allow(dead_code)]
    pub health_range: (u8, u8),
    pub has_good_first_issues: bool,
    pub min_stars: Option<u32>,
    pub license: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            activity_days: 90,
            health_range: (0, 100),
            has_good_first_issues: false,
            min_stars: None,
            license: None,
        }
    }
}
