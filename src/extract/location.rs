//! City extraction from free text
//!
//! Maps lowercase aliases (cities, states, abbreviations, neighborhoods) to
//! the canonical city the pricing backend knows about. Matching is plain
//! substring search; the longest matching alias wins so that multi-word
//! cities beat incidental short matches. Equal lengths resolve to the alias
//! declared first in [`CITY_ALIASES`].

/// City used when nothing in the text names a known location
pub const DEFAULT_CITY: &str = "New York";

/// Ordered alias table: (lowercase alias, canonical city)
pub const CITY_ALIASES: &[(&str, &str)] = &[
    // Texas
    ("lubbock", "Lubbock"),
    ("houston", "Houston"),
    ("dallas", "Dallas"),
    ("austin", "Austin"),
    ("san antonio", "San Antonio"),
    ("fort worth", "Fort Worth"),
    ("el paso", "El Paso"),
    ("arlington", "Arlington"),
    ("corpus christi", "Corpus Christi"),
    ("plano", "Plano"),
    ("texas", "Houston"),
    // Major metros and their states
    ("new york", "New York"),
    ("nyc", "New York"),
    ("manhattan", "New York"),
    ("brooklyn", "New York"),
    ("los angeles", "Los Angeles"),
    ("la", "Los Angeles"),
    ("hollywood", "Los Angeles"),
    ("chicago", "Chicago"),
    ("illinois", "Chicago"),
    ("miami", "Miami"),
    ("florida", "Miami"),
    ("boston", "Boston"),
    ("massachusetts", "Boston"),
    ("atlanta", "Atlanta"),
    ("georgia", "Atlanta"),
    ("seattle", "Seattle"),
    ("washington", "Seattle"),
    ("phoenix", "Phoenix"),
    ("arizona", "Phoenix"),
    // Other large cities
    ("philadelphia", "Philadelphia"),
    ("denver", "Denver"),
    ("detroit", "Detroit"),
    ("columbus", "Columbus"),
    ("charlotte", "Charlotte"),
    ("memphis", "Memphis"),
    ("baltimore", "Baltimore"),
    ("milwaukee", "Milwaukee"),
    ("albuquerque", "Albuquerque"),
    ("tucson", "Tucson"),
    ("fresno", "Fresno"),
    ("sacramento", "Sacramento"),
    ("kansas city", "Kansas City"),
    ("mesa", "Mesa"),
    ("virginia beach", "Virginia Beach"),
    ("omaha", "Omaha"),
    ("colorado springs", "Colorado Springs"),
    ("raleigh", "Raleigh"),
    ("long beach", "Long Beach"),
    ("miami beach", "Miami"),
    ("oakland", "Oakland"),
    ("minneapolis", "Minneapolis"),
    ("tulsa", "Tulsa"),
    ("cleveland", "Cleveland"),
    ("wichita", "Wichita"),
    ("new orleans", "New Orleans"),
    ("bakersfield", "Bakersfield"),
    ("tampa", "Tampa"),
    ("honolulu", "Honolulu"),
    ("anaheim", "Anaheim"),
    ("santa ana", "Santa Ana"),
    ("riverside", "Riverside"),
    ("lexington", "Lexington"),
    ("stockton", "Stockton"),
    ("saint paul", "Saint Paul"),
    ("cincinnati", "Cincinnati"),
    ("anchorage", "Anchorage"),
    ("henderson", "Henderson"),
    ("greensboro", "Greensboro"),
    ("newark", "Newark"),
    ("lincoln", "Lincoln"),
    ("buffalo", "Buffalo"),
    ("jersey city", "Jersey City"),
    ("chula vista", "Chula Vista"),
    ("fort wayne", "Fort Wayne"),
    ("orlando", "Orlando"),
    ("st. petersburg", "St. Petersburg"),
    ("chandler", "Chandler"),
    ("laredo", "Laredo"),
    ("norfolk", "Norfolk"),
    ("durham", "Durham"),
    ("madison", "Madison"),
    ("irvine", "Irvine"),
    ("winston-salem", "Winston-Salem"),
    ("glendale", "Glendale"),
    ("garland", "Garland"),
    ("hialeah", "Hialeah"),
    ("reno", "Reno"),
    ("chesapeake", "Chesapeake"),
    ("gilbert", "Gilbert"),
    ("baton rouge", "Baton Rouge"),
    ("irving", "Irving"),
    ("scottsdale", "Scottsdale"),
    ("north las vegas", "North Las Vegas"),
    ("fremont", "Fremont"),
    ("boise", "Boise"),
    ("richmond", "Richmond"),
    ("san bernardino", "San Bernardino"),
    ("birmingham", "Birmingham"),
    ("spokane", "Spokane"),
    ("rochester", "Rochester"),
    ("des moines", "Des Moines"),
    ("modesto", "Modesto"),
    ("fayetteville", "Fayetteville"),
    ("tacoma", "Tacoma"),
    ("oxnard", "Oxnard"),
    ("fontana", "Fontana"),
    ("montgomery", "Montgomery"),
    ("moreno valley", "Moreno Valley"),
    ("akron", "Akron"),
    ("yonkers", "Yonkers"),
    ("aurora", "Aurora"),
    ("huntington beach", "Huntington Beach"),
];

/// Find the best-matching known city in free text.
///
/// Returns `None` when no alias occurs in the text.
pub fn extract_location(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();

    let mut best: Option<(&str, &'static str)> = None;
    for &(alias, city) in CITY_ALIASES {
        if !lower.contains(alias) {
            continue;
        }
        // Strictly longer only, so the earlier declaration keeps ties
        if best.is_none_or(|(current, _)| alias.len() > current.len()) {
            best = Some((alias, city));
        }
    }

    best.map(|(_, city)| city)
}

/// Like [`extract_location`], falling back to [`DEFAULT_CITY`]
pub fn extract_location_or_default(text: &str) -> &'static str {
    extract_location(text).unwrap_or(DEFAULT_CITY)
}
