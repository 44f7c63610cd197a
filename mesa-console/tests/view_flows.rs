// mesa-console/tests/view_flows.rs
// Drives the view controllers against an in-memory reservation service

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use mesa_client::{ClientError, ClientResult, MesaApi};
use mesa_console::engine::RestaurantField;
use mesa_console::views::{
    ReservationCommand, ReservationsView, RestaurantCommand, RestaurantQuery, RestaurantsView,
};
use shared::{
    Reservation, ReservationCreate, Restaurant, RestaurantCreate, RestaurantFilter,
    RestaurantUpdate,
};

#[derive(Default)]
struct Store {
    restaurants: Vec<Restaurant>,
    reservations: Vec<Reservation>,
    next_id: i64,
    calls: Vec<String>,
}

/// In-memory service mirroring the remote API's observable behaviour
#[derive(Default)]
struct MemoryApi {
    store: Mutex<Store>,
}

impl MemoryApi {
    fn with_restaurants(names: &[(&str, &str)]) -> Self {
        let api = Self::default();
        {
            let mut store = api.store.lock().unwrap();
            for (name, city) in names {
                store.next_id += 1;
                let id = store.next_id;
                store.restaurants.push(Restaurant {
                    id,
                    name: Some(name.to_string()),
                    description: Some("desc".into()),
                    address: Some("Calle 1".into()),
                    city: Some(city.to_string()),
                    image_url: None,
                });
            }
        }
        api
    }

    fn calls(&self) -> Vec<String> {
        self.store.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl MesaApi for MemoryApi {
    async fn list_restaurants(
        &self,
        filter: Option<&RestaurantFilter>,
    ) -> ClientResult<Vec<Restaurant>> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("list_restaurants {:?}", filter));
        let rows = store
            .restaurants
            .iter()
            .filter(|r| {
                let Some(filter) = filter else { return true };
                let letter_ok = filter.letra.as_ref().is_none_or(|l| {
                    r.name.as_deref().is_some_and(|n| n.starts_with(l.as_str()))
                });
                let city_ok = filter
                    .ciudad
                    .as_ref()
                    .is_none_or(|c| r.city.as_deref() == Some(c.as_str()));
                letter_ok && city_ok
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn create_restaurant(&self, data: &RestaurantCreate) -> ClientResult<Restaurant> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("create_restaurant".into());
        store.next_id += 1;
        let created = Restaurant {
            id: store.next_id,
            name: Some(data.name.clone()),
            description: Some(data.description.clone()),
            address: Some(data.address.clone()),
            city: Some(data.city.clone()),
            image_url: data.image_url.clone(),
        };
        store.restaurants.push(created.clone());
        Ok(created)
    }

    async fn update_restaurant(&self, id: i64, data: &RestaurantUpdate) -> ClientResult<Restaurant> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("update_restaurant {}", id));
        let row = store
            .restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "Restaurante no encontrado".into(),
            })?;
        let patch = [
            (&mut row.name, &data.name),
            (&mut row.description, &data.description),
            (&mut row.address, &data.address),
            (&mut row.city, &data.city),
            (&mut row.image_url, &data.image_url),
        ];
        for (field, value) in patch {
            if value.is_some() {
                *field = value.clone();
            }
        }
        Ok(row.clone())
    }

    async fn delete_restaurant(&self, id: i64) -> ClientResult<()> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("delete_restaurant {}", id));
        store.restaurants.retain(|r| r.id != id);
        Ok(())
    }

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("list_reservations".into());
        Ok(store.reservations.clone())
    }

    async fn create_reservation(&self, data: &ReservationCreate) -> ClientResult<Reservation> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("create_reservation".into());
        let taken = store.reservations.iter().any(|r| {
            r.restaurant_id == data.restaurant_id
                && r.date == data.date
                && r.table_number == data.table_number
        });
        if taken {
            return Err(ClientError::Rejected {
                message: "Mesa ya reservada".into(),
            });
        }
        store.next_id += 1;
        let created = Reservation {
            id: store.next_id,
            restaurant_id: data.restaurant_id,
            date: data.date.clone(),
            table_number: data.table_number,
        };
        store.reservations.push(created.clone());
        Ok(created)
    }

    async fn delete_reservation(&self, id: i64) -> ClientResult<()> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("delete_reservation {}", id));
        let before = store.reservations.len();
        store.reservations.retain(|r| r.id != id);
        if store.reservations.len() == before {
            return Err(ClientError::Rejected {
                message: "Reserva no encontrada".into(),
            });
        }
        Ok(())
    }
}

/// Run a restaurant command and every follow-up it triggers
async fn drive_restaurants(view: &mut RestaurantsView, api: &MemoryApi, cmd: RestaurantCommand) {
    let mut next = Some(cmd);
    while let Some(cmd) = next {
        let event = cmd.execute(api).await;
        next = view.handle(event);
    }
}

async fn drive_reservations(view: &mut ReservationsView, api: &MemoryApi, cmd: ReservationCommand) {
    let mut next = Some(cmd);
    while let Some(cmd) = next {
        let event = cmd.execute(api).await;
        next = view.handle(event);
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
}

#[tokio::test]
async fn test_list_all_then_edit_replays_unfiltered_fetch() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima"), ("Maido", "Lima")]);
    let mut view = RestaurantsView::new();

    let cmd = view.list_all();
    drive_restaurants(&mut view, &api, cmd).await;
    assert_eq!(view.rows().len(), 2);

    view.begin_edit(1);
    view.edit_field(RestaurantField::Name, "Central 2");
    let cmd = view.save_edit().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;

    assert_eq!(view.rows()[0].name.as_deref(), Some("Central 2"));
    assert_eq!(
        api.calls(),
        vec![
            "list_restaurants None".to_string(),
            "update_restaurant 1".to_string(),
            "list_restaurants None".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_edit_saves_every_field() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima")]);
    let mut view = RestaurantsView::new();
    let cmd = view.list_all();
    drive_restaurants(&mut view, &api, cmd).await;

    view.begin_edit(1);
    view.edit_field(RestaurantField::Description, "Cocina de altura");
    view.edit_field(RestaurantField::Address, "Av. Pedro de Osma 301");
    view.edit_field(RestaurantField::ImageUrl, "https://img.local/central.jpg");
    let cmd = view.save_edit().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;

    let row = &view.rows()[0];
    assert_eq!(row.name.as_deref(), Some("Central"));
    assert_eq!(row.description.as_deref(), Some("Cocina de altura"));
    assert_eq!(row.address.as_deref(), Some("Av. Pedro de Osma 301"));
    assert_eq!(row.city.as_deref(), Some("Lima"));
    assert_eq!(row.image_url.as_deref(), Some("https://img.local/central.jpg"));
}

#[tokio::test]
async fn test_filtered_delete_replays_filtered_fetch() {
    let api = MemoryApi::with_restaurants(&[
        ("Central", "Lima"),
        ("Maido", "Lima"),
        ("Mesa Franca", "Bogotá"),
    ]);
    let mut view = RestaurantsView::new();
    view.show_filter();
    view.set_filter_letter("M");
    let cmd = view.search().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;
    assert_eq!(view.rows().len(), 2);

    view.request_delete(2);
    let cmd = view.confirm_delete().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;

    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].name.as_deref(), Some("Mesa Franca"));
    assert_eq!(
        view.query(),
        Some(&RestaurantQuery::Filtered(RestaurantFilter::new("M", "")))
    );
}

#[tokio::test]
async fn test_create_from_empty_filter_result() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima")]);
    let mut view = RestaurantsView::new();
    let cmd = view.list_all();
    drive_restaurants(&mut view, &api, cmd).await;

    view.set_column_filter(RestaurantField::Name, "Astrid");
    assert!(view.creation_row_visible());
    view.set_draft_field(RestaurantField::Name, "Astrid y Gastón");
    view.set_draft_field(RestaurantField::Description, "Peruana");
    view.set_draft_field(RestaurantField::Address, "Av. Paz Soldán 290");
    assert!(view.create().is_none());

    view.set_draft_field(RestaurantField::City, "Lima");
    let cmd = view.create().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;

    assert_eq!(view.rows().len(), 2);
    assert!(view.column_filters().is_empty());
    assert!(view.draft().name.is_empty());
    assert!(view.banner().is_none());
}

#[tokio::test]
async fn test_update_missing_restaurant_shows_server_message() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima")]);
    let mut view = RestaurantsView::new();
    let cmd = view.list_all();
    drive_restaurants(&mut view, &api, cmd).await;

    view.begin_edit(1);
    api.delete_restaurant(1).await.unwrap();
    let cmd = view.save_edit().unwrap();
    drive_restaurants(&mut view, &api, cmd).await;
    assert_eq!(view.banner(), Some("Restaurante no encontrado"));
}

#[tokio::test]
async fn test_booking_round_trip() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima"), ("Maido", "Lima")]);
    let mut view = ReservationsView::new();
    let cmd = view.mount();
    drive_reservations(&mut view, &api, cmd).await;
    assert!(!view.is_loading());
    assert_eq!(view.restaurants().len(), 2);
    assert!(view.cards().is_empty());

    view.select_restaurant(Some(2));
    view.set_date("2025-06-01", today()).unwrap();
    view.select_table(5).unwrap();
    let cmd = view.submit().unwrap();
    drive_reservations(&mut view, &api, cmd).await;

    assert!(!view.is_submitting());
    assert_eq!(view.form().restaurant_id, None);
    let cards = view.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].restaurant_name, "Maido");
    assert_eq!(cards[0].date, "1 June 2025");

    view.select_restaurant(Some(2));
    view.set_date("2025-06-01", today()).unwrap();
    assert!(view.select_table(5).is_err());
}

#[tokio::test]
async fn test_double_booking_surfaces_rejection() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima")]);
    let mut first = ReservationsView::new();
    let mut second = ReservationsView::new();
    for view in [&mut first, &mut second] {
        let cmd = view.mount();
        drive_reservations(view, &api, cmd).await;
        view.select_restaurant(Some(1));
        view.set_date("2025-06-01", today()).unwrap();
        view.select_table(3).unwrap();
    }

    let cmd = first.submit().unwrap();
    drive_reservations(&mut first, &api, cmd).await;
    assert_eq!(first.reservations().len(), 1);

    // the second console still shows table 3 free
    let cmd = second.submit().unwrap();
    drive_reservations(&mut second, &api, cmd).await;
    assert_eq!(second.banner(), Some("Mesa ya reservada"));
    assert!(second.reservations().is_empty());
    assert_eq!(second.form().table_number, Some(3));
}

#[tokio::test]
async fn test_delete_reservation_flow() {
    let api = MemoryApi::with_restaurants(&[("Central", "Lima")]);
    let mut view = ReservationsView::new();
    let cmd = view.mount();
    drive_reservations(&mut view, &api, cmd).await;

    view.select_restaurant(Some(1));
    view.set_date("2025-06-01", today()).unwrap();
    view.select_table(1).unwrap();
    let cmd = view.submit().unwrap();
    drive_reservations(&mut view, &api, cmd).await;
    let id = view.reservations()[0].id;

    view.request_delete(id);
    let cmd = view.confirm_delete().unwrap();
    drive_reservations(&mut view, &api, cmd).await;
    assert!(view.reservations().is_empty());

    // deleting again reports the in-band error and keeps the dialog closed
    view.request_delete(id);
    let cmd = view.confirm_delete().unwrap();
    drive_reservations(&mut view, &api, cmd).await;
    assert_eq!(view.banner(), Some("Reserva no encontrada"));
    assert!(!view.confirm().is_open());
}
