use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use nimbus_engine::{CurrentView, DashboardError, DashboardView, ForecastCard, ThemeTarget};

use crate::host_err;

const HIDDEN: &str = "hidden";

/// The dashboard page, addressed by element id.
///
/// Missing elements are skipped: a page without a forecast section still
/// gets its current conditions.
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            log::trace!("#{id} not on page");
        }
        element
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        let Some(el) = self.element(id) else {
            return;
        };
        let classes = el.class_list();
        let result = if hidden {
            classes.add_1(HIDDEN)
        } else {
            classes.remove_1(HIDDEN)
        };
        if result.is_err() {
            log::warn!("could not toggle visibility of #{id}");
        }
    }

    /// Current contents of the city search box, untrimmed.
    pub fn city_query(&self) -> String {
        self.element("city")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn child(&self, tag: &str, class: &str, text: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        el.set_class_name(class);
        if !text.is_empty() {
            el.set_text_content(Some(text));
        }
        Some(el)
    }

    fn forecast_card(&self, card: &ForecastCard) -> Option<Element> {
        let article = self.child("article", "forecast-card", "")?;
        let temps = self.child("div", "forecast-temps", "")?;
        let temp_max = self.child("span", "temp-max", &card.high_label())?;
        temps.append_child(&temp_max).ok()?;
        let temp_min = self.child("span", "temp-min", &card.low_label())?;
        temps.append_child(&temp_min).ok()?;
        let parts = [
            self.child("div", "forecast-date", &card.date_label())?,
            self.child("i", card.icon, "")?,
            temps,
            self.child("div", "forecast-condition", &card.condition)?,
        ];
        for part in &parts {
            article.append_child(part).ok()?;
        }
        Some(article)
    }
}

impl DashboardView for DomView {
    fn set_loading(&self, loading: bool) {
        self.set_hidden("loader", !loading);
    }

    fn show_error(&self, message: &str) {
        self.set_text("error", message);
        self.set_hidden("error", false);
    }

    fn clear_error(&self) {
        self.set_hidden("error", true);
    }

    fn show_current(&self, current: &CurrentView) {
        self.set_text("location", &current.location);
        self.set_text("date-time", &current.date_line);
        self.set_text("condition", &current.condition);
        self.set_text("humidity", &current.humidity);
        self.set_text("wind", &current.wind);
        self.set_text("pressure", &current.pressure);
        self.set_text("visibility", &current.visibility);
        self.set_text("feels-like", &current.feels_like);
        self.set_text("dew-point", &current.dew_point);
        if let Some(icon) = self.element("weatherIcon") {
            icon.set_class_name(current.icon);
        }
    }

    fn set_temperature(&self, celsius: i32) {
        self.set_text("temp", &celsius.to_string());
    }

    fn set_current_visible(&self, visible: bool) {
        self.set_hidden("current-weather", !visible);
    }

    fn show_forecast(&self, cards: &[ForecastCard]) {
        let Some(strip) = self.element("forecast") else {
            return;
        };
        strip.set_text_content(None);
        for card in cards {
            match self.forecast_card(card) {
                Some(el) => {
                    if strip.append_child(&el).is_err() {
                        log::warn!("could not attach forecast card");
                    }
                }
                None => log::warn!("could not build forecast card for {}", card.date),
            }
        }
    }

    fn set_forecast_visible(&self, visible: bool) {
        self.set_hidden("forecast-section", !visible);
    }

    fn show_sun_times(&self, sunrise: &str, sunset: &str) {
        self.set_text("sunrise", sunrise);
        self.set_text("sunset", sunset);
    }

    fn set_city_query(&self, city: &str) {
        if let Some(input) = self
            .element("city")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(city);
        }
    }
}

/// Theme classes on `<body>`.
pub struct BodyClasses {
    body: HtmlElement,
}

impl BodyClasses {
    pub fn new(document: &Document) -> Result<Self, DashboardError> {
        let body = document.body().ok_or_else(|| host_err("document has no <body>"))?;
        Ok(Self { body })
    }
}

impl ThemeTarget for BodyClasses {
    fn add_class(&self, class: &str) {
        if self.body.class_list().add_1(class).is_err() {
            log::warn!("could not add body class {class}");
        }
    }

    fn remove_class(&self, class: &str) {
        if self.body.class_list().remove_1(class).is_err() {
            log::warn!("could not remove body class {class}");
        }
    }
}
