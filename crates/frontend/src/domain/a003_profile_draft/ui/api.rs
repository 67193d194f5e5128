use contracts::domain::a003_profile_draft::draft::{
    save_method, MyProfileResponse, SaveMethod, SaveStepRequest, SaveStepResponse,
};

use crate::shared::api_utils::{get_json, patch_json, post_json};

const PATH: &str = "/api/profile";

pub async fn fetch_my_profile() -> Result<MyProfileResponse, String> {
    get_json(PATH).await
}

/// Шаг 1 новой анкеты создаёт её, остальные сохранения идут PATCH
pub async fn save_step(request: &SaveStepRequest, profile_exists: bool) -> Result<SaveStepResponse, String> {
    match save_method(request.step, profile_exists) {
        SaveMethod::Post => post_json(PATH, request).await,
        SaveMethod::Patch => patch_json(PATH, request).await,
    }
}
