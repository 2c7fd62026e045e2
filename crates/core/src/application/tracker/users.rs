// User Management Use Cases: get, list, update, delete

use crate::domain::{PageRequest, Passport, User, UserId, UserPatch};
use crate::error::{AppError, Result, StoreResultExt};
use crate::port::{UserFilter, UserRepository};

/// List request; all fields optional
#[derive(Debug, Clone, Default)]
pub struct ListUsersRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

/// One page of the user listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    /// Total number of matching users
    pub count: i64,
    pub pages: i64,
    pub page: i64,
}

/// Update request; a passport string is validated like on creation
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub passport_number: Option<String>,
}

impl UpdateUserRequest {
    fn into_patch(self) -> Result<UserPatch> {
        let passport = self
            .passport_number
            .as_deref()
            .map(Passport::parse)
            .transpose()?;

        Ok(UserPatch {
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            passport,
        })
    }
}

pub async fn get(user_repo: &dyn UserRepository, user_id: UserId) -> Result<User> {
    user_repo
        .find_by_id(user_id)
        .await
        .context("get user")?
        .ok_or_else(|| AppError::user_not_found(user_id))
}

pub async fn list(user_repo: &dyn UserRepository, req: ListUsersRequest) -> Result<UserPage> {
    let page_req = PageRequest::new(req.page, req.limit)?;
    let filter = UserFilter {
        name: req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    let count = user_repo.count(&filter).await.context("count users")?;
    let window = page_req.window(count);

    if window.pages == 0 {
        return Ok(UserPage {
            users: Vec::new(),
            count,
            pages: 0,
            page: 0,
        });
    }

    let users = user_repo
        .list(&filter, window.offset, window.limit)
        .await
        .context("list users")?;

    Ok(UserPage {
        users,
        count,
        pages: window.pages,
        page: window.page,
    })
}

pub async fn update(
    user_repo: &dyn UserRepository,
    user_id: UserId,
    req: UpdateUserRequest,
) -> Result<User> {
    let patch = req.into_patch()?;

    let mut user = get(user_repo, user_id).await?;
    user.apply(patch);

    user_repo
        .update(&user)
        .await
        .or_not_found("save user", || AppError::user_not_found(user_id))?;

    Ok(user)
}

pub async fn delete(user_repo: &dyn UserRepository, user_id: UserId) -> Result<()> {
    user_repo
        .delete(user_id)
        .await
        .or_not_found("delete user", || AppError::user_not_found(user_id))
}
