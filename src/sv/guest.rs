use crate::{entity::guest, prelude::*};

pub struct Guest<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Guest<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn get_or_create(&self, guest_id: i64) -> Result<guest::Model> {
    if let Some(guest) =
      guest::Entity::find_by_id(guest_id).one(self.db).await?
    {
      return Ok(guest);
    }

    let now = Utc::now().naive_utc();
    let guest = guest::ActiveModel {
      guest_id: Set(guest_id),
      membership_tier: Set(None),
      joined_at: Set(now),
    };

    Ok(guest.insert(self.db).await?)
  }

  #[allow(dead_code)]
  pub async fn by_id(&self, guest_id: i64) -> Result<Option<guest::Model>> {
    let guest = guest::Entity::find_by_id(guest_id).one(self.db).await?;
    Ok(guest)
  }

  /// Set or clear the guest's membership tier. The tier is resolved
  /// against membership plans at quote time, not here.
  pub async fn set_tier(
    &self,
    guest_id: i64,
    tier: Option<String>,
  ) -> Result<()> {
    let guest = guest::Entity::find_by_id(guest_id)
      .one(self.db)
      .await?
      .ok_or(Error::GuestNotFound)?;

    guest::ActiveModel { membership_tier: Set(tier), ..guest.into() }
      .update(self.db)
      .await?;

    Ok(())
  }
}
