//! Начальные данные справочников для пустой базы

use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a001_taxonomy::node::{OriginTerminology, OTHER_LANGUAGE_SLUG};

use super::country_language;
use super::repository::{self, Model};

struct SeedNode {
    kind: RecordKind,
    slug: &'static str,
    label: &'static str,
    native_label: Option<&'static str>,
    is_popular: bool,
    children: Vec<SeedNode>,
}

fn node(kind: RecordKind, slug: &'static str, label: &'static str) -> SeedNode {
    SeedNode {
        kind,
        slug,
        label,
        native_label: None,
        is_popular: false,
        children: Vec::new(),
    }
}

impl SeedNode {
    fn native(mut self, native: &'static str) -> Self {
        self.native_label = Some(native);
        self
    }

    fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    fn with(mut self, children: Vec<SeedNode>) -> Self {
        self.children = children;
        self
    }
}

fn seed_tree() -> Vec<SeedNode> {
    use RecordKind::*;
    vec![
        node(Level, "matric", "Matric"),
        node(Level, "intermediate", "Intermediate"),
        node(Level, "bachelors", "Bachelor's"),
        node(Level, "masters", "Master's"),
        node(Level, "doctorate", "Doctorate"),
        node(Field, "engineering", "Engineering"),
        node(Field, "medicine", "Medicine"),
        node(Field, "business", "Business"),
        node(Field, "computer_science", "Computer Science"),
        node(Field, "arts", "Arts & Humanities"),
        node(Language, "urdu", "Urdu").native("اردو"),
        node(Language, "punjabi", "Punjabi").native("پنجابی"),
        node(Language, "english", "English"),
        node(Language, OTHER_LANGUAGE_SLUG, "Other"),
        node(Country, "pk", "Pakistan").with(vec![
            node(State, "punjab", "Punjab").with(vec![
                node(City, "lahore", "Lahore").popular(),
                node(City, "faisalabad", "Faisalabad"),
            ]),
            node(State, "sindh", "Sindh").with(vec![node(City, "karachi", "Karachi").popular()]),
        ]),
        node(Origin, "punjabi", "Punjabi").with(vec![
            node(Ethnicity, "jat", "Jat").with(vec![node(Caste, "sandhu", "Sandhu").popular()]),
            node(Ethnicity, "arain", "Arain"),
        ]),
        node(Origin, "pashtun", "Pashtun").with(vec![node(Ethnicity, "yousafzai", "Yousafzai")]),
        node(Sect, "sunni", "Sunni").with(vec![node(Maslak, "hanafi", "Hanafi")]),
        node(Sect, "shia", "Shia").with(vec![node(Maslak, "jafari", "Jafari")]),
    ]
}

/// Для пуштунов уровни называются Tribe/Clan, второй уровень выключен
fn origin_terminology(slug: &str) -> OriginTerminology {
    match slug {
        "pashtun" => OriginTerminology {
            level1_label: "Tribe".into(),
            level1_label_plural: "Tribes".into(),
            level2_label: "Clan".into(),
            level2_label_plural: "Clans".into(),
            level2_enabled: false,
        },
        _ => OriginTerminology::default(),
    }
}

fn to_model(seed: &SeedNode, parent_id: Option<String>, sort_order: i32) -> Model {
    let now = Utc::now();
    let mut model = Model {
        id: uuid::Uuid::new_v4().to_string(),
        kind: seed.kind.key().to_string(),
        parent_id,
        slug: seed.slug.to_string(),
        label: seed.label.to_string(),
        native_label: seed.native_label.map(str::to_string),
        sort_order,
        is_active: true,
        is_popular: seed.is_popular,
        is_protected: seed.kind == RecordKind::Language && seed.slug == OTHER_LANGUAGE_SLUG,
        emoji: None,
        level1_label: None,
        level1_label_plural: None,
        level2_label: None,
        level2_label_plural: None,
        level2_enabled: true,
        created_at: Some(now),
        updated_at: Some(now),
        version: 0,
    };
    if seed.kind == RecordKind::Origin {
        let t = origin_terminology(seed.slug);
        model.level1_label = Some(t.level1_label);
        model.level1_label_plural = Some(t.level1_label_plural);
        model.level2_label = Some(t.level2_label);
        model.level2_label_plural = Some(t.level2_label_plural);
        model.level2_enabled = t.level2_enabled;
    }
    model
}

async fn insert_level(
    nodes: &[SeedNode],
    parent_id: Option<String>,
) -> Result<Vec<(RecordKind, String, String)>> {
    let mut inserted = Vec::new();
    let mut order_by_kind: std::collections::HashMap<RecordKind, i32> = Default::default();
    for seed in nodes {
        let order = order_by_kind.entry(seed.kind).or_insert(0);
        let model = repository::insert(to_model(seed, parent_id.clone(), *order)).await?;
        *order += 1;
        inserted.push((seed.kind, seed.slug.to_string(), model.id.clone()));
        Box::pin(insert_level(&seed.children, Some(model.id))).await?;
    }
    Ok(inserted)
}

/// Заполняет справочники, если таблица пуста
pub async fn seed_if_empty() -> Result<()> {
    if repository::count_all().await? > 0 {
        return Ok(());
    }
    tracing::info!("Taxonomy is empty, inserting seed data");

    let inserted = insert_level(&seed_tree(), None).await?;
    let id_of = |kind: RecordKind, slug: &str| {
        inserted
            .iter()
            .find(|(k, s, _)| *k == kind && s == slug)
            .map(|(_, _, id)| id.clone())
    };

    if let Some(pk) = id_of(RecordKind::Country, "pk") {
        for language in ["urdu", "punjabi", "english"] {
            if let Some(language_id) = id_of(RecordKind::Language, language) {
                country_language::insert(&pk, &language_id).await?;
            }
        }
    }

    tracing::info!("Taxonomy seed inserted ({} root records)", inserted.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<'a>(nodes: &'a [SeedNode], out: &mut Vec<&'a SeedNode>) {
        for n in nodes {
            out.push(n);
            walk(&n.children, out);
        }
    }

    #[test]
    fn test_seed_children_match_parent_kind() {
        fn check(nodes: &[SeedNode], parent: Option<RecordKind>) {
            for n in nodes {
                assert_eq!(n.kind.parent_kind(), parent, "{}", n.slug);
                check(&n.children, Some(n.kind));
            }
        }
        check(&seed_tree(), None);
    }

    #[test]
    fn test_other_language_is_protected() {
        let tree = seed_tree();
        let mut all = Vec::new();
        walk(&tree, &mut all);
        let other = all
            .iter()
            .find(|n| n.slug == OTHER_LANGUAGE_SLUG)
            .unwrap();
        assert!(to_model(other, None, 0).is_protected);
        let urdu = all.iter().find(|n| n.slug == "urdu").unwrap();
        assert!(!to_model(urdu, None, 0).is_protected);
    }

    #[test]
    fn test_pashtun_terminology() {
        let t = origin_terminology("pashtun");
        assert_eq!(t.level1_label, "Tribe");
        assert!(!t.level2_enabled);
        assert!(origin_terminology("punjabi").level2_enabled);
    }
}
