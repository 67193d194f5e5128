use serde::{Deserialize, Serialize};

// ============================================================================
// Taxonomy domain
// ============================================================================

/// Справочный домен: набор параллельных иерархий, редактируемых на одном экране
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyDomain {
    Education,
    Languages,
    Locations,
    Origins,
    Sects,
}

impl TaxonomyDomain {
    pub fn all() -> &'static [TaxonomyDomain] {
        &[
            TaxonomyDomain::Education,
            TaxonomyDomain::Languages,
            TaxonomyDomain::Locations,
            TaxonomyDomain::Origins,
            TaxonomyDomain::Sects,
        ]
    }

    /// Сегмент URL: `/api/admin/global-settings/<slug>`
    pub fn slug(&self) -> &'static str {
        match self {
            TaxonomyDomain::Education => "education",
            TaxonomyDomain::Languages => "languages",
            TaxonomyDomain::Locations => "locations",
            TaxonomyDomain::Origins => "origins",
            TaxonomyDomain::Sects => "sects",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.slug() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            TaxonomyDomain::Education => "Education",
            TaxonomyDomain::Languages => "Languages",
            TaxonomyDomain::Locations => "Locations",
            TaxonomyDomain::Origins => "Origins",
            TaxonomyDomain::Sects => "Sects",
        }
    }

    /// Независимые цепочки уровней домена (корень первым)
    pub fn sections(&self) -> &'static [&'static [RecordKind]] {
        match self {
            TaxonomyDomain::Education => &[&[RecordKind::Level], &[RecordKind::Field]],
            TaxonomyDomain::Languages => &[&[RecordKind::Language]],
            TaxonomyDomain::Locations => &[&[RecordKind::Country, RecordKind::State, RecordKind::City]],
            TaxonomyDomain::Origins => &[&[RecordKind::Origin, RecordKind::Ethnicity, RecordKind::Caste]],
            TaxonomyDomain::Sects => &[&[RecordKind::Sect, RecordKind::Maslak]],
        }
    }

    /// Корневой тип, который отдаёт `GET /api/admin/global-settings/<domain>`
    pub fn primary_kind(&self) -> RecordKind {
        self.sections()[0][0]
    }

    pub fn kinds(&self) -> Vec<RecordKind> {
        self.sections().iter().flat_map(|s| s.iter().copied()).collect()
    }
}

// ============================================================================
// Record kind
// ============================================================================

/// Тип записи справочника. Определяет глубину, родителя и endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Level,
    Field,
    Language,
    Country,
    State,
    City,
    Origin,
    Ethnicity,
    Caste,
    Sect,
    Maslak,
}

impl RecordKind {
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Level,
            RecordKind::Field,
            RecordKind::Language,
            RecordKind::Country,
            RecordKind::State,
            RecordKind::City,
            RecordKind::Origin,
            RecordKind::Ethnicity,
            RecordKind::Caste,
            RecordKind::Sect,
            RecordKind::Maslak,
        ]
    }

    pub fn domain(&self) -> TaxonomyDomain {
        match self {
            RecordKind::Level | RecordKind::Field => TaxonomyDomain::Education,
            RecordKind::Language => TaxonomyDomain::Languages,
            RecordKind::Country | RecordKind::State | RecordKind::City => TaxonomyDomain::Locations,
            RecordKind::Origin | RecordKind::Ethnicity | RecordKind::Caste => TaxonomyDomain::Origins,
            RecordKind::Sect | RecordKind::Maslak => TaxonomyDomain::Sects,
        }
    }

    /// Ключ типа в теле reorder-запроса и в `?table=` lookup
    pub fn key(&self) -> &'static str {
        match self {
            RecordKind::Level => "level",
            RecordKind::Field => "field",
            RecordKind::Language => "language",
            RecordKind::Country => "country",
            RecordKind::State => "state",
            RecordKind::City => "city",
            RecordKind::Origin => "origin",
            RecordKind::Ethnicity => "ethnicity",
            RecordKind::Caste => "caste",
            RecordKind::Sect => "sect",
            RecordKind::Maslak => "maslak",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.key() == s)
    }

    /// Сегмент пути: `/api/admin/global-settings/<domain>/<path_segment>`
    pub fn path_segment(&self) -> &'static str {
        match self {
            RecordKind::Level => "levels",
            RecordKind::Field => "fields",
            RecordKind::Language => "languages",
            RecordKind::Country => "countries",
            RecordKind::State => "states",
            RecordKind::City => "cities",
            RecordKind::Origin => "origins",
            RecordKind::Ethnicity => "ethnicities",
            RecordKind::Caste => "castes",
            RecordKind::Sect => "sects",
            RecordKind::Maslak => "maslaks",
        }
    }

    pub fn collection_path(&self) -> String {
        format!(
            "/api/admin/global-settings/{}/{}",
            self.domain().slug(),
            self.path_segment()
        )
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    pub fn parent_kind(&self) -> Option<RecordKind> {
        match self {
            RecordKind::State => Some(RecordKind::Country),
            RecordKind::City => Some(RecordKind::State),
            RecordKind::Ethnicity => Some(RecordKind::Origin),
            RecordKind::Caste => Some(RecordKind::Ethnicity),
            RecordKind::Maslak => Some(RecordKind::Sect),
            _ => None,
        }
    }

    pub fn child_kind(&self) -> Option<RecordKind> {
        RecordKind::all()
            .iter()
            .copied()
            .find(|k| k.parent_kind() == Some(*self))
    }

    /// Все типы потомков, от ближнего к дальнему
    pub fn descendant_kinds(&self) -> Vec<RecordKind> {
        let mut out = Vec::new();
        let mut cur = self.child_kind();
        while let Some(k) = cur {
            out.push(k);
            cur = k.child_kind();
        }
        out
    }

    /// Глубина в дереве: 1..=3
    pub fn depth(&self) -> u8 {
        match self.parent_kind() {
            None => 1,
            Some(p) => p.depth() + 1,
        }
    }

    /// Признак "popular" есть только у листьев третьего уровня
    pub fn supports_popular(&self) -> bool {
        self.depth() == 3
    }

    pub fn singular(&self) -> &'static str {
        match self {
            RecordKind::Level => "Education level",
            RecordKind::Field => "Field of study",
            RecordKind::Language => "Language",
            RecordKind::Country => "Country",
            RecordKind::State => "State",
            RecordKind::City => "City",
            RecordKind::Origin => "Origin",
            RecordKind::Ethnicity => "Ethnicity",
            RecordKind::Caste => "Caste",
            RecordKind::Sect => "Sect",
            RecordKind::Maslak => "Maslak",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Level => "Education levels",
            RecordKind::Field => "Fields of study",
            RecordKind::Language => "Languages",
            RecordKind::Country => "Countries",
            RecordKind::State => "States",
            RecordKind::City => "Cities",
            RecordKind::Origin => "Origins",
            RecordKind::Ethnicity => "Ethnicities",
            RecordKind::Caste => "Castes",
            RecordKind::Sect => "Sects",
            RecordKind::Maslak => "Maslaks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depths_and_parents() {
        assert_eq!(RecordKind::Country.depth(), 1);
        assert_eq!(RecordKind::State.depth(), 2);
        assert_eq!(RecordKind::City.depth(), 3);
        assert_eq!(RecordKind::Maslak.parent_kind(), Some(RecordKind::Sect));
        assert_eq!(RecordKind::Origin.child_kind(), Some(RecordKind::Ethnicity));
        assert_eq!(RecordKind::Language.child_kind(), None);
    }

    #[test]
    fn test_descendants() {
        assert_eq!(
            RecordKind::Origin.descendant_kinds(),
            vec![RecordKind::Ethnicity, RecordKind::Caste]
        );
        assert!(RecordKind::City.descendant_kinds().is_empty());
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            RecordKind::State.item_path("42"),
            "/api/admin/global-settings/locations/states/42"
        );
        assert_eq!(TaxonomyDomain::Education.primary_kind(), RecordKind::Level);
        assert_eq!(RecordKind::from_key("maslak"), Some(RecordKind::Maslak));
        assert_eq!(TaxonomyDomain::from_slug("sects"), Some(TaxonomyDomain::Sects));
    }

    #[test]
    fn test_every_kind_belongs_to_its_domain_sections() {
        for kind in RecordKind::all() {
            assert!(kind.domain().kinds().contains(kind));
        }
    }
}
