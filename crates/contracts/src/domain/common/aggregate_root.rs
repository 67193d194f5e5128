/// Трейт для корня агрегата
///
/// Даёт единые статические метаданные (индекс, имя коллекции, подписи для UI),
/// из которых собираются имена таблиц и заголовки вкладок
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД (например, "taxonomy_node")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a001_taxonomy_node")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Префикс для таблиц БД (например, "a001_taxonomy_node_")
    fn table_prefix() -> String {
        format!("{}_", Self::full_name())
    }
}
