//! UI strings for every supported locale.

use std::collections::HashMap;

use bustrack_core::Locale;
use once_cell::sync::Lazy;

type Table = HashMap<&'static str, &'static str>;

static EN: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("app_title", "Live Bus Tracker"),
        ("min_short", "min"),
        ("rupee_symbol", "₹"),
        ("favourite_routes", "Favourite Routes"),
        ("nav_home", "Home"),
        ("nav_routes", "Routes"),
        ("nav_map", "Map"),
        ("home_heading", "Where are you heading today?"),
        ("home_from", "FROM"),
        ("home_to", "TO"),
        ("home_select_boarding", "Select Boarding Stop"),
        ("home_select_destination", "Select Destination Stop"),
        ("home_next_bus_in", "Next bus at {stopName} in"),
        ("home_no_route_found", "No Route Found"),
        (
            "home_no_route_desc",
            "There are no direct buses available for the selected route.",
        ),
        ("home_no_bus", "No bus on {routeName} can reach {stopName} in time."),
        ("home_hint", "Pick stops with Up/Down and Enter. Left/Right switches field."),
        ("ticket_price", "Ticket Price"),
        ("delay_info", "Delayed: {reason}"),
        ("routes_all", "All Routes"),
        ("routes_search_placeholder", "Search routes by name or stop..."),
        ("routes_direction_to", "Direction: To {terminusName}"),
        ("routes_passed", "Passed"),
        ("routes_due", "Due"),
        ("routes_no_bus", "No bus on this route"),
        ("trip_details", "Trip Details"),
        ("stops", "Stops"),
        ("arrivals_title", "Next Arrivals"),
        ("arrivals_low_data", "Low Data Mode On"),
        ("arrivals_to", "to {stopName}"),
        ("map_live", "Live Map"),
        ("map_updated", "Updated {time}"),
        ("map_buses", "Buses"),
        ("map_eta_terminus", "Terminus ETA: {eta} min"),
        ("map_at_terminus", "At terminus"),
        ("profile_language", "Language"),
        ("profile_low_bw_mode", "Low Bandwidth Mode"),
    ])
});

static PA: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("app_title", "ਲਾਈਵ ਬੱਸ ਟਰੈਕਰ"),
        ("min_short", "ਮਿੰਟ"),
        ("rupee_symbol", "₹"),
        ("favourite_routes", "ਮਨਪਸੰਦ ਰੂਟ"),
        ("nav_home", "ਹੋਮ"),
        ("nav_routes", "ਰੂਟ"),
        ("nav_map", "ਨਕਸ਼ਾ"),
        ("home_heading", "ਤੁਸੀਂ ਅੱਜ ਕਿੱਥੇ ਜਾ ਰਹੇ ਹੋ?"),
        ("home_from", "ਤੋਂ"),
        ("home_to", "ਨੂੰ"),
        ("home_select_boarding", "ਬੋਰਡਿੰਗ ਸਟਾਪ ਚੁਣੋ"),
        ("home_select_destination", "ਮੰਜ਼ਿਲ ਸਟਾਪ ਚੁਣੋ"),
        ("home_next_bus_in", "{stopName} 'ਤੇ ਅਗਲੀ ਬੱਸ"),
        ("home_no_route_found", "ਕੋਈ ਰੂਟ ਨਹੀਂ ਮਿਲਿਆ"),
        (
            "home_no_route_desc",
            "ਚੁਣੇ ਗਏ ਰੂਟ ਲਈ ਕੋਈ ਸਿੱਧੀ ਬੱਸ ਉਪਲਬਧ ਨਹੀਂ ਹੈ।",
        ),
        ("ticket_price", "ਟਿਕਟ ਦੀ ਕੀਮਤ"),
        ("delay_info", "ਦੇਰੀ: {reason}"),
        ("routes_all", "ਸਾਰੇ ਰੂਟ"),
        ("routes_search_placeholder", "ਨਾਮ ਜਾਂ ਸਟਾਪ ਦੁਆਰਾ ਰੂਟ ਖੋਜੋ..."),
        ("routes_direction_to", "ਦਿਸ਼ਾ: {terminusName} ਨੂੰ"),
        ("routes_passed", "ਲੰਘ ਗਈ"),
        ("routes_due", "ਆਉਣ ਵਾਲੀ"),
        ("trip_details", "ਯਾਤਰਾ ਦੇ ਵੇਰਵੇ"),
        ("stops", "ਸਟਾਪ"),
        ("map_live", "ਲਾਈਵ ਨਕਸ਼ਾ"),
        ("map_eta_terminus", "ਟਰਮਿਨਸ ETA: {eta} ਮਿੰਟ"),
        ("map_at_terminus", "ਟਰਮਿਨਸ 'ਤੇ"),
        ("profile_language", "ਭਾਸ਼ਾ"),
        ("profile_low_bw_mode", "ਘੱਟ ਬੈਂਡਵਿਡਥ ਮੋਡ"),
    ])
});

fn table(locale: Locale) -> &'static Table {
    match locale {
        Locale::En => &EN,
        Locale::Pa => &PA,
    }
}

/// Look up `key` for `locale`, falling back to English and then to the key itself.
pub fn t(locale: Locale, key: &'static str) -> &'static str {
    table(locale)
        .get(key)
        .or_else(|| EN.get(key))
        .copied()
        .unwrap_or(key)
}

/// Like [`t`], replacing each `{name}` placeholder with its value.
pub fn tr(locale: Locale, key: &'static str, replacements: &[(&str, &str)]) -> String {
    let mut text = t(locale, key).to_string();
    for (name, value) in replacements {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_per_locale() {
        assert_eq!(t(Locale::En, "nav_routes"), "Routes");
        assert_eq!(t(Locale::Pa, "nav_routes"), "ਰੂਟ");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        assert_eq!(t(Locale::Pa, "arrivals_title"), "Next Arrivals");
        assert_eq!(t(Locale::Pa, "no_such_key"), "no_such_key");
    }

    #[test]
    fn substitutes_placeholders() {
        assert_eq!(
            tr(Locale::En, "map_eta_terminus", &[("eta", "12")]),
            "Terminus ETA: 12 min"
        );
        assert_eq!(
            tr(Locale::Pa, "routes_direction_to", &[("terminusName", "ਖਰੜ")]),
            "ਦਿਸ਼ਾ: ਖਰੜ ਨੂੰ"
        );
    }

    #[test]
    fn every_punjabi_key_exists_in_english() {
        for key in PA.keys() {
            assert!(EN.contains_key(key), "missing English string for {key}");
        }
    }
}
