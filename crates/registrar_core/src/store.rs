//! The entity store: sole owner of the four collections.

use crate::change_feed::{ChangeEvent, ChangeFeed, ChangeType};
use crate::collection::Table;
use crate::config::StoreConfig;
use crate::entity::{Course, CourseOffering, CourseType, NamedRecord, Record, StudentRegistration};
use crate::error::{CatalogError, CatalogResult};
use crate::form;
use crate::query;
use crate::rules;
use crate::seed;
use crate::stats::StoreStats;
use crate::types::{
    CourseId, CourseTypeId, EntityKind, OfferingId, RecordId, RegistrationId, SequenceNumber,
};
use std::sync::mpsc::Receiver;
use tracing::{debug, warn};

/// In-memory store of course types, courses, offerings and registrations.
///
/// Every mutation goes through a method on this type. Each one runs its
/// integrity rules against the current rows first and either applies the
/// whole change or returns an error without touching anything. On success
/// the affected collection is replaced by a new version, the store
/// [`version`](EntityStore::version) advances, and a [`ChangeEvent`] is
/// emitted.
///
/// Parents are referenced by id only. Deleting a course type or course
/// that an offering still uses is refused; deleting an offering or a
/// registration always succeeds.
///
/// # Example
///
/// ```rust,ignore
/// use registrar_core::{CourseId, CourseTypeId, EntityStore};
///
/// let mut store = EntityStore::new();
/// let offering = store.add_course_offering(CourseId::new(4), CourseTypeId::new(1))?;
/// store.register_student("Alice", Some(offering.id))?;
/// ```
pub struct EntityStore {
    config: StoreConfig,
    course_types: Table<CourseType>,
    courses: Table<Course>,
    offerings: Table<CourseOffering>,
    registrations: Table<StudentRegistration>,
    version: SequenceNumber,
    changes: ChangeFeed,
    stats: StoreStats,
}

impl EntityStore {
    /// Opens a store with the default configuration and sample catalog.
    pub fn new() -> Self {
        Self::open(StoreConfig::default())
    }

    /// Opens a store with a custom configuration.
    pub fn open(config: StoreConfig) -> Self {
        let policy = config.id_allocation;
        let (course_types, courses, offerings) = if config.seed {
            (
                Table::with_rows(policy, seed::course_types()),
                Table::with_rows(policy, seed::courses()),
                Table::with_rows(policy, seed::offerings()),
            )
        } else {
            (Table::new(policy), Table::new(policy), Table::new(policy))
        };

        debug!(
            seeded = config.seed,
            policy = ?policy,
            course_types = course_types.len(),
            courses = courses.len(),
            offerings = offerings.len(),
            "store opened"
        );

        Self {
            changes: ChangeFeed::with_max_history(config.change_history),
            course_types,
            courses,
            offerings,
            registrations: Table::new(policy),
            version: SequenceNumber::default(),
            stats: StoreStats::new(),
            config,
        }
    }

    /// Returns the configuration the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Course type collection.
    pub fn course_types(&self) -> &Table<CourseType> {
        &self.course_types
    }

    /// Course collection.
    pub fn courses(&self) -> &Table<Course> {
        &self.courses
    }

    /// Course offering collection.
    pub fn course_offerings(&self) -> &Table<CourseOffering> {
        &self.offerings
    }

    /// Student registration collection.
    pub fn student_registrations(&self) -> &Table<StudentRegistration> {
        &self.registrations
    }

    /// Number of successful mutations since the store was opened.
    ///
    /// A presentation layer can compare this against the value it last
    /// rendered to decide whether to re-read the collections.
    pub fn version(&self) -> SequenceNumber {
        self.version
    }

    /// Subscribes to change events.
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    /// Returns the change feed.
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    /// Returns operation counters.
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    // === Course types ===

    /// Adds a course type with the trimmed `name`.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is blank, `DuplicateName` if another course
    /// type has the same name ignoring case.
    pub fn add_course_type(&mut self, name: &str) -> CatalogResult<CourseType> {
        let result = insert_named(&mut self.course_types, name);
        self.settle("add", ChangeType::Insert, result)
    }

    /// Renames a course type. Returns `None` and changes nothing if `id`
    /// does not exist.
    ///
    /// The name is stored as given; duplicate checks are left to the
    /// caller (see [`EntityStore::save_course_type`]).
    pub fn update_course_type(&mut self, id: CourseTypeId, name: &str) -> Option<CourseType> {
        let updated = self.course_types.update(id, |row| row.renamed(name.to_owned()));
        self.settle_optional(ChangeType::Update, updated)
    }

    /// Deletes a course type. Returns `Ok(None)` if `id` does not exist.
    ///
    /// # Errors
    ///
    /// `InUse` while any course offering references the course type.
    pub fn delete_course_type(&mut self, id: CourseTypeId) -> CatalogResult<Option<CourseType>> {
        let result = rules::ensure_course_type_unused(self.offerings.rows(), id)
            .map(|()| self.course_types.remove(id));
        self.settle_removal(result)
    }

    /// Validates form input and adds or renames a course type.
    ///
    /// Applies the form rules of [`form::validate_catalog_name`] (required,
    /// minimum length, duplicate excluding `editing`) before calling
    /// [`add_course_type`](EntityStore::add_course_type) or
    /// [`update_course_type`](EntityStore::update_course_type).
    pub fn save_course_type(
        &mut self,
        editing: Option<CourseTypeId>,
        input: &str,
    ) -> CatalogResult<Option<CourseType>> {
        let name = form::validate_catalog_name(
            input,
            self.course_types.rows(),
            editing,
            self.config.min_name_len,
        )
        .map_err(|err| self.reject(EntityKind::CourseType, "save", err))?;
        match editing {
            Some(id) => Ok(self.update_course_type(id, &name)),
            None => self.add_course_type(&name).map(Some),
        }
    }

    // === Courses ===

    /// Adds a course with the trimmed `name`.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is blank, `DuplicateName` if another course
    /// has the same name ignoring case.
    pub fn add_course(&mut self, name: &str) -> CatalogResult<Course> {
        let result = insert_named(&mut self.courses, name);
        self.settle("add", ChangeType::Insert, result)
    }

    /// Renames a course. Returns `None` and changes nothing if `id` does
    /// not exist. No duplicate check, as for course types.
    pub fn update_course(&mut self, id: CourseId, name: &str) -> Option<Course> {
        let updated = self.courses.update(id, |row| row.renamed(name.to_owned()));
        self.settle_optional(ChangeType::Update, updated)
    }

    /// Deletes a course. Returns `Ok(None)` if `id` does not exist.
    ///
    /// # Errors
    ///
    /// `InUse` while any course offering references the course.
    pub fn delete_course(&mut self, id: CourseId) -> CatalogResult<Option<Course>> {
        let result =
            rules::ensure_course_unused(self.offerings.rows(), id).map(|()| self.courses.remove(id));
        self.settle_removal(result)
    }

    /// Validates form input and adds or renames a course.
    pub fn save_course(
        &mut self,
        editing: Option<CourseId>,
        input: &str,
    ) -> CatalogResult<Option<Course>> {
        let name = form::validate_catalog_name(
            input,
            self.courses.rows(),
            editing,
            self.config.min_name_len,
        )
        .map_err(|err| self.reject(EntityKind::Course, "save", err))?;
        match editing {
            Some(id) => Ok(self.update_course(id, &name)),
            None => self.add_course(&name).map(Some),
        }
    }

    // === Course offerings ===

    /// Pairs a course with a course type.
    ///
    /// The ids are not checked against the course and course type
    /// collections.
    ///
    /// # Errors
    ///
    /// `DuplicateCombination` if the same `(course, course type)` pair is
    /// already offered. The pair is ordered: swapping the arguments names
    /// a different pair.
    pub fn add_course_offering(
        &mut self,
        course_id: CourseId,
        course_type_id: CourseTypeId,
    ) -> CatalogResult<CourseOffering> {
        let result = self.try_add_offering(course_id, course_type_id);
        self.settle("add", ChangeType::Insert, result)
    }

    fn try_add_offering(
        &mut self,
        course_id: CourseId,
        course_type_id: CourseTypeId,
    ) -> CatalogResult<CourseOffering> {
        rules::ensure_unique_offering(self.offerings.rows(), course_id, course_type_id, None)?;
        let offering = CourseOffering {
            id: self.offerings.next_id()?,
            course_id,
            course_type_id,
        };
        self.offerings.insert(offering);
        Ok(offering)
    }

    /// Re-points an offering. Returns `Ok(None)` if `id` does not exist.
    ///
    /// # Errors
    ///
    /// `DuplicateCombination` if a different offering already has the new
    /// pair.
    pub fn update_course_offering(
        &mut self,
        id: OfferingId,
        course_id: CourseId,
        course_type_id: CourseTypeId,
    ) -> CatalogResult<Option<CourseOffering>> {
        let result =
            rules::ensure_unique_offering(self.offerings.rows(), course_id, course_type_id, Some(id))
                .map(|()| {
                    self.offerings.update(id, |row| CourseOffering {
                        id: row.id,
                        course_id,
                        course_type_id,
                    })
                });
        match result {
            Ok(updated) => Ok(self.settle_optional(ChangeType::Update, updated)),
            Err(err) => Err(self.reject(EntityKind::CourseOffering, "update", err)),
        }
    }

    /// Deletes an offering. Registrations against it are left in place.
    pub fn delete_course_offering(&mut self, id: OfferingId) -> Option<CourseOffering> {
        let removed = self.offerings.remove(id);
        self.settle_optional(ChangeType::Delete, removed)
    }

    /// Validates the offering form and adds or re-points an offering.
    pub fn save_course_offering(
        &mut self,
        editing: Option<OfferingId>,
        course_id: Option<CourseId>,
        course_type_id: Option<CourseTypeId>,
    ) -> CatalogResult<Option<CourseOffering>> {
        let (course_id, course_type_id) =
            form::validate_offering_selection(course_id, course_type_id)
                .map_err(|err| self.reject(EntityKind::CourseOffering, "save", err))?;
        match editing {
            Some(id) => self.update_course_offering(id, course_id, course_type_id),
            None => self.add_course_offering(course_id, course_type_id).map(Some),
        }
    }

    // === Student registrations ===

    /// Registers a student for an offering.
    ///
    /// The name is trimmed and stored in its original case. `None` or a
    /// zero id means no offering was chosen.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is blank or no offering is given,
    /// `DuplicateRegistration` if the same name (ignoring case) is already
    /// registered for the offering.
    pub fn register_student(
        &mut self,
        student_name: &str,
        offering_id: Option<OfferingId>,
    ) -> CatalogResult<StudentRegistration> {
        let result = self.try_register(student_name, offering_id);
        self.settle("register", ChangeType::Insert, result)
    }

    fn try_register(
        &mut self,
        student_name: &str,
        offering_id: Option<OfferingId>,
    ) -> CatalogResult<StudentRegistration> {
        let student_name =
            rules::require_text("student_name", student_name, "Student name is required")?;
        let offering_id = rules::require_offering(offering_id)?;
        rules::ensure_not_registered(self.registrations.rows(), student_name, offering_id)?;

        let registration = StudentRegistration {
            id: self.registrations.next_id()?,
            student_name: student_name.to_owned(),
            offering_id,
        };
        self.registrations.insert(registration.clone());
        Ok(registration)
    }

    /// Registrations for an offering, in registration order.
    pub fn get_registrations_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> Vec<&StudentRegistration> {
        query::registrations_for_offering(self.registrations.rows(), offering_id)
    }

    /// Deletes a registration.
    pub fn delete_registration(&mut self, id: RegistrationId) -> Option<StudentRegistration> {
        let removed = self.registrations.remove(id);
        self.settle_optional(ChangeType::Delete, removed)
    }

    // === Lookups ===

    /// Looks up a course.
    pub fn get_course_by_id(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Looks up a course type.
    pub fn get_course_type_by_id(&self, id: CourseTypeId) -> Option<&CourseType> {
        self.course_types.get(id)
    }

    /// Looks up a course offering.
    pub fn get_course_offering_by_id(&self, id: OfferingId) -> Option<&CourseOffering> {
        self.offerings.get(id)
    }

    /// Renders an offering as `"{course type} - {course}"`.
    pub fn offering_display_name(&self, offering: &CourseOffering) -> String {
        query::offering_display_name(offering, self.courses.rows(), self.course_types.rows())
    }

    /// Offerings of one course type, as shown when registering students.
    pub fn offerings_for_course_type(&self, id: CourseTypeId) -> Vec<&CourseOffering> {
        query::offerings_with_course_type(self.offerings.rows(), id).collect()
    }

    /// Course types whose name contains `term`, ignoring case.
    pub fn search_course_types(&self, term: &str) -> Vec<&CourseType> {
        query::search_by_name(self.course_types.rows(), term)
    }

    /// Courses whose name contains `term`, ignoring case.
    pub fn search_courses(&self, term: &str) -> Vec<&Course> {
        query::search_by_name(self.courses.rows(), term)
    }

    /// Offerings whose display name contains `term`, ignoring case.
    pub fn search_offerings(&self, term: &str) -> Vec<&CourseOffering> {
        query::search_offerings(
            self.offerings.rows(),
            self.courses.rows(),
            self.course_types.rows(),
            term,
        )
    }

    // === Bookkeeping ===

    fn settle<T: Record>(
        &mut self,
        op: &'static str,
        change: ChangeType,
        result: CatalogResult<T>,
    ) -> CatalogResult<T> {
        match result {
            Ok(row) => {
                self.commit(change, T::KIND, row.id().raw());
                Ok(row)
            }
            Err(err) => Err(self.reject(T::KIND, op, err)),
        }
    }

    fn settle_optional<T: Record>(&mut self, change: ChangeType, row: Option<T>) -> Option<T> {
        match &row {
            Some(row) => self.commit(change, T::KIND, row.id().raw()),
            None => debug!(kind = %T::KIND, ?change, "no record with that id; nothing changed"),
        }
        row
    }

    fn settle_removal<T: Record>(
        &mut self,
        result: CatalogResult<Option<T>>,
    ) -> CatalogResult<Option<T>> {
        match result {
            Ok(removed) => Ok(self.settle_optional(ChangeType::Delete, removed)),
            Err(err) => Err(self.reject(T::KIND, "delete", err)),
        }
    }

    fn commit(&mut self, change: ChangeType, kind: EntityKind, id: u32) {
        self.version = self.version.next();
        match change {
            ChangeType::Insert => self.stats.record_insert(),
            ChangeType::Update => self.stats.record_update(),
            ChangeType::Delete => self.stats.record_delete(),
        }
        debug!(%kind, id, ?change, sequence = self.version.as_u64(), "change applied");
        self.changes.emit(ChangeEvent {
            sequence: self.version,
            kind,
            id,
            change_type: change,
        });
    }

    fn reject(&self, kind: EntityKind, op: &'static str, err: CatalogError) -> CatalogError {
        self.stats.record_rejection();
        warn!(%kind, op, code = err.code(), "rejected: {err}");
        err
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("version", &self.version)
            .field("course_types", &self.course_types.len())
            .field("courses", &self.courses.len())
            .field("offerings", &self.offerings.len())
            .field("registrations", &self.registrations.len())
            .finish_non_exhaustive()
    }
}

/// Inserts a named record after the blank and duplicate checks.
fn insert_named<T: NamedRecord>(table: &mut Table<T>, name: &str) -> CatalogResult<T> {
    let name = rules::require_text("name", name, format!("{} name is required", T::KIND.title()))?;
    rules::ensure_unique_name(table.rows(), name, None)?;
    let row = T::named(table.next_id()?, name.to_owned());
    table.insert(row.clone());
    Ok(row)
}
