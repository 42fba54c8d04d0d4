use crate::core::models::user::{Credentials, Insert as UserInsert, User};
use crate::core::ports::repository::{Store, TxStore, UserCommon};
use crate::error::Error;
use hex::ToHex;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 32;
const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

pub fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

fn random_salt() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(SALT_LEN).map(char::from).collect()
}

fn validate_credentials(credentials: &Credentials) -> Result<(), Error> {
    let len = credentials.username.chars().count();
    if len < USERNAME_MIN_LEN || len > USERNAME_MAX_LEN {
        return Err(Error::ValidationError(format!(
            "username must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if credentials.password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::ValidationError(format!("password must be at least {} characters", PASSWORD_MIN_LEN)));
    }
    Ok(())
}

async fn insert_user<T>(store: &mut T, credentials: Credentials, is_staff: bool) -> Result<i32, Error>
where
    T: TxStore,
{
    let slt = random_salt();
    UserCommon::insert(
        store,
        UserInsert {
            password: hash_password(&credentials.password, &slt),
            username: credentials.username,
            salt: slt,
            is_staff,
        },
    )
    .await
}

pub async fn signup<T>(mut store: T, credentials: Credentials) -> Result<i32, Error>
where
    T: TxStore,
{
    validate_credentials(&credentials)?;
    if UserCommon::get_by_username(&mut store, &credentials.username).await?.is_some() {
        return Err(Error::ValidationError("username already taken".into()));
    }
    let id = insert_user(&mut store, credentials, false).await?;
    store.commit().await?;
    log::info!("user {} signed up", id);
    Ok(id)
}

/// Returns the user when the password matches, `Error::Unauthorized` otherwise.
pub async fn authenticate<S>(store: &mut S, credentials: &Credentials) -> Result<User, Error>
where
    S: Store,
{
    match UserCommon::get_by_username(store, &credentials.username).await? {
        Some(user) if hash_password(&credentials.password, &user.salt) == user.password => Ok(user),
        _ => Err(Error::Unauthorized),
    }
}

/// Makes sure a staff account with these credentials exists, promoting an
/// existing user of the same name if needed.
pub async fn ensure_admin<T>(mut store: T, credentials: Credentials) -> Result<i32, Error>
where
    T: TxStore,
{
    let id = match UserCommon::get_by_username(&mut store, &credentials.username).await? {
        Some(user) => {
            if !user.is_staff {
                UserCommon::set_staff(&mut store, user.id, true).await?;
            }
            user.id
        }
        None => {
            validate_credentials(&credentials)?;
            insert_user(&mut store, credentials, true).await?
        }
    };
    store.commit().await?;
    Ok(id)
}
