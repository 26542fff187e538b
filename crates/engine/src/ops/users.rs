use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User,
    password::{hash_password, verify_password},
    users,
    util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a user with an Argon2-hashed password.
    ///
    /// Usernames are unique; a taken one is an [`EngineError::ExistingKey`].
    pub async fn register_user(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = normalize_required_name(username, "username")?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        let password_hash = hash_password(password)?;

        with_tx!(self, |db_tx| {
            if users::Entity::find()
                .filter(users::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(username));
            }

            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(username.clone()),
                password_hash: ActiveValue::Set(password_hash),
                is_premium: ActiveValue::Set(false),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::unique_violation(err, username))?;
            Ok(User::from(model))
        })
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !verify_password(password, &model.password_hash)? {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(User::from(model))
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    /// Toggle the premium flag, the only mutable user attribute.
    pub async fn set_premium(&self, username: &str, is_premium: bool) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Username.eq(username.trim()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

            let mut active: users::ActiveModel = model.into();
            active.is_premium = ActiveValue::Set(is_premium);
            let model = active.update(&db_tx).await?;
            Ok(User::from(model))
        })
    }
}
