//! Bidirectional mapping between [`FilterState`] and a URL query string.
//!
//! Wire format:
//!
//! - `category`, `search`, `minPrice`, `maxPrice`, `sortBy`, `page` map 1:1.
//! - `brand` holds the selected slugs, each percent-encoded on its own and
//!   joined with a literal `,`.
//! - Any other key is a specification filter: `<spec name>=<value>`.
//!
//! Decoding `brand` decodes the whole joined value first and then splits on
//! `,`, so a slug that itself contains a comma comes back as two slugs. The
//! encoder logs a warning when it is asked to emit such a slug.

use std::borrow::Cow;

use tracing::warn;

use super::params::QueryParams;
use super::sort::SortOption;
use super::state::FilterState;

pub const KEY_CATEGORY: &str = "category";
pub const KEY_BRAND: &str = "brand";
pub const KEY_SEARCH: &str = "search";
pub const KEY_MIN_PRICE: &str = "minPrice";
pub const KEY_MAX_PRICE: &str = "maxPrice";
pub const KEY_SORT_BY: &str = "sortBy";
pub const KEY_PAGE: &str = "page";

/// Keys with a fixed meaning; everything else is a spec filter.
pub const RESERVED_KEYS: [&str; 7] = [
    KEY_CATEGORY,
    KEY_BRAND,
    KEY_SEARCH,
    KEY_MIN_PRICE,
    KEY_MAX_PRICE,
    KEY_SORT_BY,
    KEY_PAGE,
];

/// Encoder/decoder for filter URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterStateCodec;

impl FilterStateCodec {
    /// Serialize a filter state. Absent or empty values are omitted.
    pub fn encode(state: &FilterState) -> String {
        Self::to_params(state).to_query_string()
    }

    /// Serialize into a parameter list.
    pub fn to_params(state: &FilterState) -> QueryParams {
        let mut params = QueryParams::new();

        if let Some(category) = &state.category {
            params.set(KEY_CATEGORY, encode_component(category));
        }
        if !state.brands.is_empty() {
            params.set(KEY_BRAND, encode_list(state.brands.iter().map(String::as_str)));
        }
        if let Some(search) = &state.search {
            params.set(KEY_SEARCH, encode_component(search));
        }
        for (name, value) in state.specs.iter().filter(|(name, _)| is_spec_key(name)) {
            params.set(&encode_component(name), encode_component(value));
        }
        if let Some(min) = state.min_price {
            params.set(KEY_MIN_PRICE, min.to_string());
        }
        if let Some(max) = state.max_price {
            params.set(KEY_MAX_PRICE, max.to_string());
        }
        if let Some(sort) = state.sort_by {
            params.set(KEY_SORT_BY, sort.as_str());
        }
        if let Some(page) = state.page {
            params.set(KEY_PAGE, page.to_string());
        }

        params
    }

    /// Parse a query string. Malformed values degrade instead of failing:
    /// undecodable text falls back to the raw string and unparsable numbers
    /// are treated as absent.
    pub fn decode(query: &str) -> FilterState {
        let mut state = FilterState::default();

        for (raw_key, raw_value) in QueryParams::parse(query).iter() {
            let key = decode_component(raw_key);
            if key.is_empty() {
                continue;
            }

            match key.as_str() {
                KEY_CATEGORY => state.category = non_empty(decode_component(raw_value)),
                KEY_BRAND => state.brands = decode_list(raw_value).into_iter().collect(),
                KEY_SEARCH => state.search = non_empty(decode_component(raw_value)),
                KEY_MIN_PRICE => state.min_price = parse_price(raw_value),
                KEY_MAX_PRICE => state.max_price = parse_price(raw_value),
                KEY_SORT_BY => state.sort_by = SortOption::parse(&decode_component(raw_value)),
                KEY_PAGE => {
                    state.page = decode_component(raw_value)
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|page| *page >= 1)
                }
                _ => {
                    let value = decode_component(raw_value);
                    if value.is_empty() {
                        state.specs.remove(&key);
                    } else {
                        state.specs.insert(key, value);
                    }
                }
            }
        }

        state
    }

    /// Set one scalar parameter on an existing query string.
    ///
    /// An empty value deletes the key. Any key other than `page` also
    /// deletes `page`.
    pub fn set_param(query: &str, key: &str, value: &str) -> String {
        let mut params = QueryParams::parse(query);
        let raw_key = encode_component(key);
        params.set(&raw_key, encode_component(value));
        reset_page(&mut params, key);
        params.to_query_string()
    }

    /// Set a list parameter (such as `brand`) on an existing query string.
    pub fn set_list_param<I, S>(query: &str, key: &str, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        let mut params = QueryParams::parse(query);
        params.set(&encode_component(key), encode_list(values.iter().map(AsRef::as_ref)));
        reset_page(&mut params, key);
        params.to_query_string()
    }

    /// Delete a parameter from an existing query string.
    pub fn remove_param(query: &str, key: &str) -> String {
        let mut params = QueryParams::parse(query);
        params.remove(&encode_component(key));
        reset_page(&mut params, key);
        params.to_query_string()
    }

    /// Brand slugs that will not survive a round trip.
    pub fn ambiguous_brands(state: &FilterState) -> Vec<&str> {
        state
            .brands
            .iter()
            .filter(|slug| slug.contains(','))
            .map(String::as_str)
            .collect()
    }
}

/// Names a spec filter may use without colliding with a fixed key.
pub(crate) fn is_spec_key(name: &str) -> bool {
    !name.trim().is_empty() && !RESERVED_KEYS.contains(&name)
}

fn reset_page(params: &mut QueryParams, changed_key: &str) {
    if changed_key != KEY_PAGE {
        params.remove(KEY_PAGE);
    }
}

fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn encode_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .filter(|value| !value.is_empty())
        .map(|value| {
            if value.contains(',') {
                warn!(value, "list element contains a comma and will split on decode");
            }
            encode_component(value)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Percent-decode, treating `+` as a space. Falls back to the raw text when
/// the bytes are not valid UTF-8.
fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Decode the whole joined value, then split. On decode failure split the
/// raw string instead.
fn decode_list(raw: &str) -> Vec<String> {
    let spaced = raw.replace('+', " ");
    let joined = match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };
    joined
        .split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_price(raw: &str) -> Option<f64> {
    decode_component(raw)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterChange;

    fn sample_state() -> FilterState {
        FilterState::new()
            .with(FilterChange::SetCategory(Some("phones".to_string())))
            .with(FilterChange::ToggleBrand("acme".to_string()))
            .with(FilterChange::ToggleBrand("zeta & co".to_string()))
            .with(FilterChange::SelectSpec {
                name: "RAM".to_string(),
                value: "8GB".to_string(),
            })
            .with(FilterChange::SelectSpec {
                name: "Screen Size".to_string(),
                value: "6.1\" / 15.5cm".to_string(),
            })
            .with(FilterChange::SetPriceRange {
                min: Some(100.0),
                max: Some(899.5),
            })
            .with(FilterChange::SetSearch(Some("pro max".to_string())))
            .with(FilterChange::SetSort(Some(SortOption::PriceAsc)))
            .with(FilterChange::SetPage(3))
    }

    #[test]
    fn test_encode_known_keys() {
        let query = FilterStateCodec::encode(&sample_state());
        assert!(query.starts_with("category=phones&brand=acme,zeta%20%26%20co&search=pro%20max"));
        assert!(query.contains("RAM=8GB"));
        assert!(query.contains("Screen%20Size=6.1%22%20%2F%2015.5cm"));
        assert!(query.contains("minPrice=100&maxPrice=899.5"));
        assert!(query.ends_with("sortBy=price_asc&page=3"));
    }

    #[test]
    fn test_brand_separator_is_a_literal_comma() {
        let state = FilterState::new()
            .with(FilterChange::ToggleBrand("a b".to_string()))
            .with(FilterChange::ToggleBrand("c".to_string()));
        assert_eq!(FilterStateCodec::encode(&state), "brand=a%20b,c");
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let decoded = FilterStateCodec::decode(&FilterStateCodec::encode(&state));
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_round_trip_empty_state() {
        assert_eq!(FilterStateCodec::encode(&FilterState::new()), "");
        assert_eq!(FilterStateCodec::decode(""), FilterState::new());
    }

    #[test]
    fn test_decode_invalid_numbers_are_absent() {
        let state = FilterStateCodec::decode("?minPrice=cheap&maxPrice=NaN&page=-2&sortBy=weird");
        assert_eq!(state.min_price, None);
        assert_eq!(state.max_price, None);
        assert_eq!(state.page, None);
        assert_eq!(state.sort_by, None);
        assert!(state.specs.is_empty());
    }

    #[test]
    fn test_decode_negative_prices_are_absent() {
        let state = FilterStateCodec::decode("minPrice=-5&maxPrice=-0.5");
        assert_eq!(state.min_price, None);
        assert_eq!(state.max_price, None);

        let state = FilterStateCodec::decode("minPrice=0&maxPrice=10");
        assert_eq!(state.min_price, Some(0.0));
        assert_eq!(state.max_price, Some(10.0));
    }

    #[test]
    fn test_reserved_spec_names_are_not_encoded() {
        let mut state = FilterState::new().with(FilterChange::SelectSpec {
            name: "RAM".to_string(),
            value: "8GB".to_string(),
        });
        state.specs.insert("sortBy".to_string(), "x".to_string());
        state.specs.insert("page".to_string(), "2".to_string());

        let query = FilterStateCodec::encode(&state);
        assert_eq!(query, "RAM=8GB");

        state.specs.remove("sortBy");
        state.specs.remove("page");
        assert_eq!(FilterStateCodec::decode(&query), state);
    }

    #[test]
    fn test_decode_unknown_keys_are_specs() {
        let state = FilterStateCodec::decode("Battery%20Life=5000mAh&Storage=128GB");
        assert_eq!(state.specs.get("Battery Life").map(String::as_str), Some("5000mAh"));
        assert_eq!(state.specs.get("Storage").map(String::as_str), Some("128GB"));
    }

    #[test]
    fn test_decode_falls_back_to_raw_on_bad_utf8() {
        let state = FilterStateCodec::decode("Color=%FF%FE&search=%C3%28");
        assert_eq!(state.specs.get("Color").map(String::as_str), Some("%FF%FE"));
        assert_eq!(state.search.as_deref(), Some("%C3%28"));
    }

    #[test]
    fn test_decode_brand_list_falls_back_to_raw_split() {
        let state = FilterStateCodec::decode("brand=acme,%FF");
        let brands: Vec<&str> = state.brands.iter().map(String::as_str).collect();
        assert_eq!(brands, vec!["%FF", "acme"]);
    }

    #[test]
    fn test_comma_inside_brand_splits_on_decode() {
        let state = FilterState::new().with(FilterChange::ToggleBrand("a,b".to_string()));
        assert_eq!(FilterStateCodec::ambiguous_brands(&state), vec!["a,b"]);

        let decoded = FilterStateCodec::decode(&FilterStateCodec::encode(&state));
        assert_eq!(decoded.brands.len(), 2);
    }

    #[test]
    fn test_decode_plus_is_space() {
        let state = FilterStateCodec::decode("search=galaxy+s24");
        assert_eq!(state.search.as_deref(), Some("galaxy s24"));
    }

    #[test]
    fn test_set_param_resets_page() {
        let query = FilterStateCodec::set_param("brand=acme&page=4", "RAM", "8GB");
        assert_eq!(query, "brand=acme&RAM=8GB");
    }

    #[test]
    fn test_set_page_keeps_page() {
        let query = FilterStateCodec::set_param("brand=acme", "page", "2");
        assert_eq!(query, "brand=acme&page=2");
    }

    #[test]
    fn test_set_param_empty_value_removes_key() {
        let query = FilterStateCodec::set_param("search=tv&page=2", "search", "");
        assert_eq!(query, "");
    }

    #[test]
    fn test_set_list_param() {
        let query = FilterStateCodec::set_list_param("page=5", "brand", ["acme", "zeta co"]);
        assert_eq!(query, "brand=acme,zeta%20co");
    }

    #[test]
    fn test_remove_param() {
        let query = FilterStateCodec::remove_param("RAM=8GB&Storage=64GB&page=2", "RAM");
        assert_eq!(query, "Storage=64GB");
    }
}
