use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "flash";

/// One-shot notices shown on the next page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    EmailSent,
    PostArchived,
    StandupSaved,
    ItemAdded,
    ItemDeleted,
}

impl Flash {
    const ALL: [Flash; 5] = [
        Flash::EmailSent,
        Flash::PostArchived,
        Flash::StandupSaved,
        Flash::ItemAdded,
        Flash::ItemDeleted,
    ];

    fn key(&self) -> &'static str {
        match self {
            Flash::EmailSent => "email_sent",
            Flash::PostArchived => "post_archived",
            Flash::StandupSaved => "standup_saved",
            Flash::ItemAdded => "item_added",
            Flash::ItemDeleted => "item_deleted",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::EmailSent => "Successfully sent Standup email!",
            Flash::PostArchived => "Post archived.",
            Flash::StandupSaved => "Standup saved.",
            Flash::ItemAdded => "Item added to the board.",
            Flash::ItemDeleted => "Item removed from the board.",
        }
    }

    fn from_key(key: &str) -> Option<Flash> {
        Flash::ALL.into_iter().find(|flash| flash.key() == key)
    }
}

pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.key()))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Reads the pending notice, if any, and clears it.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<&'static str>) {
    let message = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_key(cookie.value()))
        .map(|flash| flash.message());
    if message.is_none() {
        return (jar, None);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
