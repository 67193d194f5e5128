//! Заголовки вкладок по ключу. Ключи справочников: `gs_<domain>`

use contracts::domain::a001_taxonomy::kind::TaxonomyDomain;
use contracts::domain::a002_profile::ProfileSnapshot;
use contracts::domain::common::AggregateRoot;

pub const PROFILE_DETAIL_PREFIX: &str = "a002_profile_detail_";
pub const PROFILE_EDIT_PREFIX: &str = "a002_profile_edit_";
const TAXONOMY_PREFIX: &str = "gs_";

pub fn taxonomy_tab_key(domain: TaxonomyDomain) -> String {
    format!("{}{}", TAXONOMY_PREFIX, domain.slug())
}

pub fn taxonomy_domain_for_key(key: &str) -> Option<TaxonomyDomain> {
    key.strip_prefix(TAXONOMY_PREFIX)
        .and_then(TaxonomyDomain::from_slug)
}

pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a002_profile" => ProfileSnapshot::list_name(),
        "a003_profile_wizard" => "My profile",
        "sys_verification" => "Phone verification",
        "sys_account" => "Account settings",
        k => taxonomy_domain_for_key(k)
            .map(|d| d.title())
            .unwrap_or(""),
    }
}

/// «<entity> · <identifier>», идентификатор сокращается до 8 символов
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    let short: String = identifier.chars().take(8).collect();
    format!("{} · {}", entity_label, short)
}

/// Заголовок для любого ключа, включая вкладки карточек; fallback: сам ключ
pub fn tab_title_for_key(key: &str) -> String {
    if let Some(id) = key.strip_prefix(PROFILE_DETAIL_PREFIX) {
        return detail_tab_label(ProfileSnapshot::element_name(), id);
    }
    if let Some(id) = key.strip_prefix(PROFILE_EDIT_PREFIX) {
        return detail_tab_label("Edit profile", id);
    }
    match tab_label_for_key(key) {
        "" => key.to_string(),
        label => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_keys_resolve() {
        for domain in TaxonomyDomain::all() {
            let key = taxonomy_tab_key(*domain);
            assert_eq!(taxonomy_domain_for_key(&key), Some(*domain));
            assert_eq!(tab_label_for_key(&key), domain.title());
        }
        assert_eq!(taxonomy_domain_for_key("gs_unknown"), None);
    }

    #[test]
    fn test_detail_titles() {
        assert_eq!(
            tab_title_for_key("a002_profile_detail_0123456789abcdef"),
            "Profile · 01234567"
        );
        assert_eq!(tab_title_for_key("a002_profile_edit_42"), "Edit profile · 42");
        assert_eq!(tab_title_for_key("unknown_key"), "unknown_key");
    }
}
