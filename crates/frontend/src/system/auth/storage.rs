use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "matrimony_access_token";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Токен обновления не выдаётся: при истечении access-токена пользователь входит заново
pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}
