//! Localized UI strings.
//!
//! [`Translator`] is a pure key → string lookup over the built-in locale
//! tables.  Keys are dotted (`errors.noRss`, `buttons.add`); a key missing
//! from the table translates to itself so a typo shows up on screen instead
//! of silently rendering nothing.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    En,
    #[default]
    Ru,
}

const EN: &[(&str, &str)] = &[
    ("header", "RSS reader"),
    ("description", "All that you want in one place"),
    ("placeholder", "Put URL here"),
    ("example", "Example: https://ru.hexlet.io/lessons.rss"),
    ("feedsTitle", "Feeds"),
    ("feedsDescription", "List of feeds"),
    ("postsTitle", "Posts"),
    ("postsDescription", "List of related posts"),
    ("modalLink", "Read full story"),
    ("buttons.add", "Add"),
    ("buttons.preview", "Quick view"),
    ("buttons.modalCloseBtn", "Close"),
    ("errors.noRss", "There is no RSS-feed at this URL"),
    ("errors.existedRss", "This feed is already here (please find it below)"),
    ("errors.required", "Please fill in this field"),
    ("errors.invalidUrl", "The value is not URL"),
    ("errors.network", "Network error. Try again later"),
    ("messages.success", "Feed was successfully added"),
    ("messages.progress", "Loading ..."),
];

const RU: &[(&str, &str)] = &[
    ("header", "RSS агрегатор"),
    ("description", "Всё интересное в одном месте"),
    ("placeholder", "ссылка RSS"),
    ("example", "Пример: https://ru.hexlet.io/lessons.rss"),
    ("feedsTitle", "Фиды"),
    ("feedsDescription", "Здесь появится список ваших потоков"),
    ("postsTitle", "Посты"),
    ("postsDescription", "Здесь появятся свежие новости с добавленных потоков"),
    ("modalLink", "Читать полностью"),
    ("buttons.add", "Добавить"),
    ("buttons.preview", "Просмотр"),
    ("buttons.modalCloseBtn", "Закрыть"),
    ("errors.noRss", "Ресурс не содержит валидный RSS"),
    ("errors.existedRss", "RSS уже существует"),
    ("errors.required", "Не должно быть пустым"),
    ("errors.invalidUrl", "Ссылка должна быть валидным URL"),
    ("errors.network", "Ошибка сети"),
    ("messages.success", "RSS успешно загружен"),
    ("messages.progress", "Идет загрузка ..."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up `key` in the active locale.
    pub fn t(&self, key: &str) -> String {
        let table = match self.locale {
            Locale::En => EN,
            Locale::Ru => RU,
        };
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
