use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_profile::edit::ProfileRefs;
use contracts::domain::a002_profile::moderation::ModerationStatus;
use contracts::domain::a002_profile::snapshot::ProfileListItem;
use contracts::domain::a003_profile_draft::draft::ProfileDraft;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, Set, Statement};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub display_name: String,
    pub profile_for: String,
    pub gender: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub origin_id: Option<String>,
    pub ethnicity_id: Option<String>,
    pub caste_id: Option<String>,
    pub suggested_caste: Option<String>,
    pub mother_tongue_id: Option<String>,
    pub suggested_mother_tongue: Option<String>,
    pub country_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
    pub suggested_city: Option<String>,
    pub sect_id: Option<String>,
    pub maslak_id: Option<String>,
    pub religiosity: String,
    pub family_type: String,
    pub father_occupation: String,
    pub siblings: Option<i32>,
    pub height_cm: Option<i32>,
    pub body_type: String,
    pub complexion: String,
    pub education_level_id: Option<String>,
    pub education_field_id: Option<String>,
    pub occupation: String,
    pub annual_income: String,
    pub about: String,
    pub visibility: String,
    pub completion_percentage: i32,
    pub moderation_status: String,
    pub moderation_feedback: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn text(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl Model {
    pub fn status(&self) -> ModerationStatus {
        ModerationStatus::from_str(&self.moderation_status).unwrap_or_default()
    }

    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            profile_for: self.profile_for.clone(),
            gender: self.gender.clone(),
            date_of_birth: self.date_of_birth.clone(),
            marital_status: self.marital_status.clone(),
            display_name: self.display_name.clone(),
            origin_id: self.origin_id.clone(),
            ethnicity_id: self.ethnicity_id.clone(),
            caste_id: self.caste_id.clone(),
            suggested_caste: self.suggested_caste.clone().unwrap_or_default(),
            mother_tongue_id: self.mother_tongue_id.clone(),
            suggested_mother_tongue: self.suggested_mother_tongue.clone().unwrap_or_default(),
            country_id: self.country_id.clone(),
            state_id: self.state_id.clone(),
            city_id: self.city_id.clone(),
            suggested_city: self.suggested_city.clone().unwrap_or_default(),
            sect_id: self.sect_id.clone(),
            maslak_id: self.maslak_id.clone(),
            religiosity: self.religiosity.clone(),
            family_type: self.family_type.clone(),
            father_occupation: self.father_occupation.clone(),
            siblings: self.siblings.and_then(|v| u8::try_from(v).ok()),
            height_cm: self.height_cm.and_then(|v| u16::try_from(v).ok()),
            body_type: self.body_type.clone(),
            complexion: self.complexion.clone(),
            education_level_id: self.education_level_id.clone(),
            education_field_id: self.education_field_id.clone(),
            occupation: self.occupation.clone(),
            annual_income: self.annual_income.clone(),
            about: self.about.clone(),
            visibility: self.visibility.clone(),
        }
    }

    /// Перенос полного снимка мастера в строку анкеты
    pub fn apply_draft(&mut self, d: &ProfileDraft) {
        self.display_name = d.display_name.trim().to_string();
        self.profile_for = d.profile_for.clone();
        self.gender = d.gender.clone();
        self.date_of_birth = d.date_of_birth.trim().to_string();
        self.marital_status = d.marital_status.clone();
        self.origin_id = d.origin_id.clone();
        self.ethnicity_id = d.ethnicity_id.clone();
        self.caste_id = d.caste_id.clone();
        self.suggested_caste = text(&d.suggested_caste);
        self.mother_tongue_id = d.mother_tongue_id.clone();
        self.suggested_mother_tongue = text(&d.suggested_mother_tongue);
        self.country_id = d.country_id.clone();
        self.state_id = d.state_id.clone();
        self.city_id = d.city_id.clone();
        self.suggested_city = text(&d.suggested_city);
        self.sect_id = d.sect_id.clone();
        self.maslak_id = d.maslak_id.clone();
        self.religiosity = d.religiosity.clone();
        self.family_type = d.family_type.clone();
        self.father_occupation = d.father_occupation.trim().to_string();
        self.siblings = d.siblings.map(i32::from);
        self.height_cm = d.height_cm.map(i32::from);
        self.body_type = d.body_type.clone();
        self.complexion = d.complexion.clone();
        self.education_level_id = d.education_level_id.clone();
        self.education_field_id = d.education_field_id.clone();
        self.occupation = d.occupation.trim().to_string();
        self.annual_income = d.annual_income.clone();
        self.about = d.about.trim().to_string();
        self.visibility = d.visibility.clone();
    }

    pub fn refs(&self) -> ProfileRefs {
        ProfileRefs {
            country_id: self.country_id.clone(),
            state_id: self.state_id.clone(),
            city_id: self.city_id.clone(),
            origin_id: self.origin_id.clone(),
            ethnicity_id: self.ethnicity_id.clone(),
            caste_id: self.caste_id.clone(),
            mother_tongue_id: self.mother_tongue_id.clone(),
        }
    }

    pub fn apply_refs(&mut self, refs: &ProfileRefs) {
        self.country_id = refs.country_id.clone();
        self.state_id = refs.state_id.clone();
        self.city_id = refs.city_id.clone();
        self.origin_id = refs.origin_id.clone();
        self.ethnicity_id = refs.ethnicity_id.clone();
        self.caste_id = refs.caste_id.clone();
        self.mother_tongue_id = refs.mother_tongue_id.clone();
    }

    /// Пустая анкета пользователя до первого сохранения
    pub fn new_for_user(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            display_name: String::new(),
            profile_for: String::new(),
            gender: String::new(),
            date_of_birth: String::new(),
            marital_status: String::new(),
            origin_id: None,
            ethnicity_id: None,
            caste_id: None,
            suggested_caste: None,
            mother_tongue_id: None,
            suggested_mother_tongue: None,
            country_id: None,
            state_id: None,
            city_id: None,
            suggested_city: None,
            sect_id: None,
            maslak_id: None,
            religiosity: String::new(),
            family_type: String::new(),
            father_occupation: String::new(),
            siblings: None,
            height_cm: None,
            body_type: String::new(),
            complexion: String::new(),
            education_level_id: None,
            education_field_id: None,
            occupation: String::new(),
            annual_income: String::new(),
            about: String::new(),
            visibility: String::new(),
            completion_percentage: 0,
            moderation_status: ModerationStatus::Pending.as_str().to_string(),
            moderation_feedback: None,
            created_at: Some(now),
            updated_at: Some(now),
            version: 0,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn()).await?)
}

pub async fn get_by_user(user_id: &str) -> Result<Option<Model>> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(conn())
        .await?)
}

pub async fn insert(model: Model) -> Result<Model> {
    let active: ActiveModel = model.into();
    Ok(active.insert(conn()).await?)
}

/// Полная перезапись строки с увеличением версии
pub async fn save(model: Model) -> Result<Model> {
    let active = ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        display_name: Set(model.display_name),
        profile_for: Set(model.profile_for),
        gender: Set(model.gender),
        date_of_birth: Set(model.date_of_birth),
        marital_status: Set(model.marital_status),
        origin_id: Set(model.origin_id),
        ethnicity_id: Set(model.ethnicity_id),
        caste_id: Set(model.caste_id),
        suggested_caste: Set(model.suggested_caste),
        mother_tongue_id: Set(model.mother_tongue_id),
        suggested_mother_tongue: Set(model.suggested_mother_tongue),
        country_id: Set(model.country_id),
        state_id: Set(model.state_id),
        city_id: Set(model.city_id),
        suggested_city: Set(model.suggested_city),
        sect_id: Set(model.sect_id),
        maslak_id: Set(model.maslak_id),
        religiosity: Set(model.religiosity),
        family_type: Set(model.family_type),
        father_occupation: Set(model.father_occupation),
        siblings: Set(model.siblings),
        height_cm: Set(model.height_cm),
        body_type: Set(model.body_type),
        complexion: Set(model.complexion),
        education_level_id: Set(model.education_level_id),
        education_field_id: Set(model.education_field_id),
        occupation: Set(model.occupation),
        annual_income: Set(model.annual_income),
        about: Set(model.about),
        visibility: Set(model.visibility),
        completion_percentage: Set(model.completion_percentage),
        moderation_status: Set(model.moderation_status),
        moderation_feedback: Set(model.moderation_feedback),
        updated_at: Set(Some(Utc::now())),
        version: Set(model.version + 1),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    Ok(active.update(conn()).await?)
}

pub async fn set_moderation(
    id: &str,
    status: ModerationStatus,
    feedback: Option<String>,
) -> Result<()> {
    let Some(model) = get_by_id(id).await? else {
        return Ok(());
    };
    let mut active: ActiveModel = model.clone().into();
    active.moderation_status = Set(status.as_str().to_string());
    active.moderation_feedback = Set(feedback);
    active.updated_at = Set(Some(Utc::now()));
    active.version = Set(model.version + 1);
    active.update(conn()).await?;
    Ok(())
}

pub async fn count_by_status(status: Option<ModerationStatus>) -> Result<u64> {
    let status = status.map(|s| s.as_str().to_string());
    let row = conn()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM a002_profile WHERE (? IS NULL OR moderation_status = ?)",
            [status.clone().into(), status.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")? as u64),
        None => Ok(0),
    }
}

/// Очередь модерации: свежие изменения сверху
pub async fn list_page(
    status: Option<ModerationStatus>,
    offset: u64,
    limit: u64,
) -> Result<Vec<ProfileListItem>> {
    let status = status.map(|s| s.as_str().to_string());
    let rows = conn()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT p.id, p.display_name, u.username, p.gender,
                    city.label AS city_label, p.suggested_city,
                    origin.label AS origin_label,
                    p.completion_percentage, p.moderation_status, p.updated_at,
                    (SELECT COUNT(*) FROM a002_profile_photo ph WHERE ph.profile_id = p.id) AS photo_count,
                    (SELECT COUNT(*) FROM a002_profile_photo ph
                        WHERE ph.profile_id = p.id AND ph.status = 'PENDING') AS pending_photo_count
             FROM a002_profile p
             LEFT JOIN sys_users u ON u.id = p.user_id
             LEFT JOIN a001_taxonomy_node city ON city.id = p.city_id
             LEFT JOIN a001_taxonomy_node origin ON origin.id = p.origin_id
             WHERE (? IS NULL OR p.moderation_status = ?)
             ORDER BY p.updated_at DESC
             LIMIT ? OFFSET ?",
            [
                status.clone().into(),
                status.into(),
                (limit as i64).into(),
                i64::try_from(offset).unwrap_or(i64::MAX).into(),
            ],
        ))
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let status: String = row.try_get("", "moderation_status")?;
        let city: Option<String> = row.try_get("", "city_label")?;
        let suggested_city: Option<String> = row.try_get("", "suggested_city")?;
        let completion: i32 = row.try_get("", "completion_percentage")?;
        items.push(ProfileListItem {
            id: row.try_get("", "id")?,
            display_name: row.try_get("", "display_name")?,
            username: row
                .try_get::<Option<String>>("", "username")?
                .unwrap_or_default(),
            gender: row.try_get("", "gender")?,
            city: city.or(suggested_city),
            origin: row.try_get("", "origin_label")?,
            completion_percentage: completion.clamp(0, 100) as u8,
            moderation_status: ModerationStatus::from_str(&status).unwrap_or_default(),
            photo_count: row.try_get("", "photo_count")?,
            pending_photo_count: row.try_get("", "pending_photo_count")?,
            updated_at: row
                .try_get::<Option<String>>("", "updated_at")?
                .unwrap_or_default(),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_roundtrip_through_row() {
        let mut row = Model::new_for_user("u1");
        let draft = ProfileDraft {
            display_name: " Ayesha ".into(),
            suggested_city: "  ".into(),
            suggested_caste: "Awan".into(),
            height_cm: Some(165),
            siblings: Some(3),
            ..Default::default()
        };
        row.apply_draft(&draft);
        assert_eq!(row.display_name, "Ayesha");
        assert_eq!(row.suggested_city, None);
        assert_eq!(row.suggested_caste.as_deref(), Some("Awan"));

        let back = row.to_draft();
        assert_eq!(back.height_cm, Some(165));
        assert_eq!(back.siblings, Some(3));
        assert_eq!(back.suggested_city, "");
        assert_eq!(row.status(), ModerationStatus::Pending);
    }
}
