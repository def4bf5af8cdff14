/// Source of `VOCABDEX_*` values; the process environment outside of tests.
pub(super) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(super) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[must_use]
pub(super) fn read_non_empty_env(lookup: EnvLookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Unparsable or too-small values fall back to `default_value`.
#[must_use]
pub(super) fn read_env_usize(
    lookup: EnvLookup<'_>,
    name: &str,
    default_value: usize,
    min_value: usize,
) -> usize {
    lookup(name)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

/// Comma- or whitespace-separated list; `None` when the variable is unset or blank.
#[must_use]
pub(super) fn read_env_list(lookup: EnvLookup<'_>, name: &str) -> Option<Vec<String>> {
    let raw = read_non_empty_env(lookup, name)?;
    Some(
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect(),
    )
}
