use tracing::{info, instrument, warn};

use super::{
    dto::{
        NewUser, UserPatch, DEFAULT_CALORIE_TARGET, DEFAULT_CARBS_TARGET, DEFAULT_DIET_TYPE,
        DEFAULT_FAT_TARGET, DEFAULT_PROTEIN_TARGET,
    },
    password::hash_password,
    repo_types::{NewUserRow, User},
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
    store::DuplicateUsername,
    validation::Validate,
};

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(state: &AppState, payload: NewUser) -> AppResult<User> {
    payload.validate()?;
    let username = payload.username.trim().to_string();

    if state.store.get_user_by_username(&username).await?.is_some() {
        warn!("username already taken");
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let row = NewUserRow {
        password_hash: hash_password(&payload.password)?,
        username,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        calorie_target: payload.calorie_target.unwrap_or(DEFAULT_CALORIE_TARGET),
        protein_target: payload.protein_target.unwrap_or(DEFAULT_PROTEIN_TARGET),
        carbs_target: payload.carbs_target.unwrap_or(DEFAULT_CARBS_TARGET),
        fat_target: payload.fat_target.unwrap_or(DEFAULT_FAT_TARGET),
        diet_type: payload.diet_type.unwrap_or_else(|| DEFAULT_DIET_TYPE.into()),
        allergens: payload.allergens.unwrap_or_default(),
    };
    // a concurrent register can win between the check above and the insert
    let user = match state.store.create_user(&row).await {
        Ok(user) => user,
        Err(e) if e.is::<DuplicateUsername>() => {
            warn!("username taken by a concurrent registration");
            return Err(AppError::Conflict("Username already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };
    info!(user_id = user.id, "user registered");
    Ok(user)
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<User> {
    state.store.get_user(id).await?.ok_or(AppError::NotFound("User"))
}

#[instrument(skip(state, patch))]
pub async fn update_user(state: &AppState, id: i32, mut patch: UserPatch) -> AppResult<User> {
    patch.validate()?;
    if let Some(email) = patch.email.as_mut() {
        *email = email.trim().to_lowercase();
    }
    let user = state
        .store
        .update_user(id, &patch)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    info!(user_id = id, "user updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password: "s3cret-pass".into(),
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: " Ana@Example.com ".into(),
            calorie_target: None,
            protein_target: Some(120),
            carbs_target: None,
            fat_target: None,
            diet_type: None,
            allergens: None,
        }
    }

    #[tokio::test]
    async fn register_fills_defaults_and_hashes_password() {
        let state = AppState::in_memory();
        let user = register(&state, new_user("ana")).await.unwrap();
        assert_eq!(user.calorie_target, DEFAULT_CALORIE_TARGET);
        assert_eq!(user.protein_target, 120);
        assert_eq!(user.diet_type, DEFAULT_DIET_TYPE);
        assert_eq!(user.email, "ana@example.com");
        assert!(user.allergens.is_empty());
        assert_ne!(user.password_hash, "s3cret-pass");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let state = AppState::in_memory();
        register(&state, new_user("ana")).await.unwrap();
        let err = register(&state, new_user("ana")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_registrations_yield_one_user_and_conflicts() {
        let state = AppState::in_memory();
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { register(&state, new_user("ana")).await })
            })
            .collect();

        let (mut created, mut conflicts) = (0, 0);
        for t in tasks {
            match t.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((created, conflicts), (1, 7));
    }

    #[tokio::test]
    async fn store_rejects_duplicate_username() {
        let state = AppState::in_memory();
        register(&state, new_user("ana")).await.unwrap();
        let row = NewUserRow {
            username: "ana".into(),
            password_hash: "x".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.co".into(),
            calorie_target: 1,
            protein_target: 1,
            carbs_target: 1,
            fat_target: 1,
            diet_type: "balanced".into(),
            allergens: vec![],
        };
        let err = state.store.create_user(&row).await.unwrap_err();
        assert!(err.is::<DuplicateUsername>());
    }

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let state = AppState::in_memory();
        let user = register(&state, new_user("ana")).await.unwrap();
        let patch = UserPatch { fat_target: Some(55), ..Default::default() };
        let updated = update_user(&state, user.id, patch).await.unwrap();
        assert_eq!(updated.fat_target, 55);
        assert_eq!(updated.protein_target, 120);
        assert_eq!(updated.first_name, "Ana");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let state = AppState::in_memory();
        assert!(matches!(get_user(&state, 3).await, Err(AppError::NotFound("User"))));
    }
}
