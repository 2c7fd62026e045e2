// SQLite UserRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use time_tracker_core::domain::{NewUser, Passport, User, UserId};
use time_tracker_core::port::{StoreError, StoreResult, UserFilter, UserRepository};

const USER_COLUMNS: &str = "id, name, surname, patronymic, passport_serie, passport_number";

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Case-folded full name stored in `users.search_name`.
///
/// SQLite's LIKE only folds ASCII, so both sides are folded here instead.
pub(crate) fn search_key(name: &str, surname: &str, patronymic: &str) -> String {
    format!("{} {} {}", name, surname, patronymic).to_lowercase()
}

/// `%term%` over the folded term, LIKE wildcards escaped (ESCAPE '\')
fn like_pattern(filter: &UserFilter) -> Option<String> {
    filter.name.as_deref().map(|term| {
        let escaped = term
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, surname, patronymic, passport_serie, passport_number, search_name)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.patronymic)
        .bind(user.passport.series)
        .bind(user.passport.number)
        .bind(search_key(&user.name, &user.surname, &user.patronymic))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, surname = ?, patronymic = ?, passport_serie = ?, passport_number = ?,
                search_name = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.patronymic)
        .bind(user.passport.series)
        .bind(user.passport.number)
        .bind(search_key(&user.name, &user.surname, &user.patronymic))
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> StoreResult<()> {
        // Tasks go with the user (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, filter: &UserFilter) -> StoreResult<i64> {
        let pattern = like_pattern(filter);

        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ? IS NULL
               OR search_name LIKE ? ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list(&self, filter: &UserFilter, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let pattern = like_pattern(filter);

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM users
            WHERE ? IS NULL
               OR search_name LIKE ? ESCAPE '\'
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
            USER_COLUMNS
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    surname: String,
    patronymic: String,
    passport_serie: i64,
    passport_number: i64,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            passport: Passport::new(self.passport_serie, self.passport_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use time_tracker_core::domain::PersonName;

    async fn setup_test_db() -> SqlitePool {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn named(name: &str, surname: &str, patronymic: &str) -> NewUser {
        NewUser::from_passport(Passport::new(1234, 567890)).with_name(PersonName {
            name: name.into(),
            surname: surname.into(),
            patronymic: patronymic.into(),
        })
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteUserRepository::new(setup_test_db().await);

        let id = repo
            .insert(&named("John", "Doe", "Smith"))
            .await
            .unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.surname, "Doe");
        assert_eq!(found.passport, Passport::new(1234, 567890));

        assert!(repo.find_by_id(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        let id = repo.insert(&named("John", "Doe", "")).await.unwrap();

        let mut user = repo.find_by_id(id).await.unwrap().unwrap();
        user.name = "Jane".into();
        user.passport = Passport::new(1, 2);
        repo.update(&user).await.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap(), user);

        user.id = 999;
        assert_eq!(repo.update(&user).await.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        let id = repo.insert(&named("John", "Doe", "")).await.unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.delete(id).await.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn test_count_and_list_with_filter() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        repo.insert(&named("Ivan", "Ivanov", "Ivanovich")).await.unwrap();
        repo.insert(&named("Petr", "Petrov", "Petrovich")).await.unwrap();
        repo.insert(&named("Ivanna", "Sidorova", "")).await.unwrap();

        let all = UserFilter::default();
        assert_eq!(repo.count(&all).await.unwrap(), 3);

        let ivans = UserFilter {
            name: Some("ivan".into()),
        };
        assert_eq!(repo.count(&ivans).await.unwrap(), 2);

        let page = repo.list(&ivans, 0, 10).await.unwrap();
        let names: Vec<&str> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ivan", "Ivanna"]);

        // Matches across the concatenated full name
        let full = UserFilter {
            name: Some("Petrov Petrovich".into()),
        };
        assert_eq!(repo.count(&full).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_paging() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        for i in 0..5 {
            repo.insert(&named(&format!("user{}", i), "", "")).await.unwrap();
        }

        let page = repo.list(&UserFilter::default(), 2, 2).await.unwrap();
        let names: Vec<&str> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["user2", "user3"]);
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        repo.insert(&named("100%", "", "")).await.unwrap();
        repo.insert(&named("1000", "", "")).await.unwrap();

        let filter = UserFilter {
            name: Some("0%".into()),
        };
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filter_folds_cyrillic_case() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        repo.insert(&named("Иван", "Иванов", "Иванович")).await.unwrap();
        repo.insert(&named("Пётр", "Петров", "")).await.unwrap();

        for term in ["иван", "Иван", "ИВАНОВ", "иванов иванович"] {
            let filter = UserFilter {
                name: Some(term.into()),
            };
            assert_eq!(repo.count(&filter).await.unwrap(), 1, "term {:?}", term);
        }

        let filter = UserFilter {
            name: Some("пЁтР".into()),
        };
        let found = repo.list(&filter, 0, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].surname, "Петров");
    }

    #[tokio::test]
    async fn test_update_refreshes_search_name() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        let id = repo.insert(&named("", "", "")).await.unwrap();

        let mut user = repo.find_by_id(id).await.unwrap().unwrap();
        user.surname = "Сидорова".into();
        repo.update(&user).await.unwrap();

        let filter = UserFilter {
            name: Some("сидорова".into()),
        };
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[test]
    fn test_search_key() {
        assert_eq!(search_key("Иван", "ИВАНОВ", "Ivanovich"), "иван иванов ivanovich");
    }
}
