// handlers/mod.rs
//
// items/   - per-resource CRUD and group counts (state: ItemService)
// docs     - static OpenAPI document and Swagger UI
// system   - service info, health, 404/405 fallbacks (state: AppState)
pub mod docs;
pub mod items;
pub mod system;
