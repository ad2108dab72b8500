//! The relational reconstructor
//!
//! A pure pass over the frozen [`TableArena`], executed as a fixed,
//! dependency-ordered sequence: files, users, taxonomy terms, lesson
//! variations (with their date/location/teacher side-tables), orders with
//! line items, courses embedding their lessons, and finally the derived
//! instructor list. Later steps look things up in earlier indices, so the
//! order is not negotiable.
//!
//! The dump has no registration entity. Attendance is inferred from order
//! ownership: the owner of an order is recorded as an attendee of every
//! lesson that order purchased. This is a deliberate heuristic carried
//! over from the source system, not a join that can be made precise.
//!
//! Dangling references are everywhere in real exports; every lookup miss
//! degrades to a null or absent field and the pass never fails.

use crate::catalog::index::EntityIndex;
use crate::progress::ProgressReporter;
use crate::sql::scanner::TableArena;
use crate::sql::value::{json_join_key, JoinKey};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Role tag marking instructor accounts in the source site.
const INSTRUCTOR_ROLE: &str = "lesgever";

/// The finished document tree.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub courses: Vec<Value>,
    pub orders: Vec<Value>,
    pub teachers: Vec<Value>,
}

impl Catalog {
    /// Total lessons embedded across all courses.
    pub fn lesson_count(&self) -> usize {
        self.courses
            .iter()
            .filter_map(|c| c.get("lessons").and_then(Value::as_array))
            .map(Vec::len)
            .sum()
    }

    /// Total inferred attendee entries across all lessons.
    pub fn participant_count(&self) -> usize {
        self.courses
            .iter()
            .filter_map(|c| c.get("lessons").and_then(Value::as_array))
            .flatten()
            .filter_map(|l| l.get("attendees").and_then(Value::as_array))
            .map(Vec::len)
            .sum()
    }
}

/// Rebuild the nested catalog from the scanned row buffers.
pub fn rebuild(arena: &TableArena, progress: &mut ProgressReporter) -> Catalog {
    let files = index_files(arena, progress);
    let users = index_users(arena, &files, progress);
    let terms = index_terms(arena, progress);
    let (mut variations, lessons_by_course) =
        index_variations(arena, &terms, &users, progress);
    // Orders run before course assembly: line items attach inferred
    // attendees to variations, and courses embed the finished documents.
    let orders = build_orders(arena, &users, &mut variations, progress);
    let courses = build_courses(
        arena,
        &files,
        &terms,
        &variations,
        &lessons_by_course,
        progress,
    );
    let teachers = derive_teachers(&users, &variations);

    let catalog = Catalog {
        courses,
        orders,
        teachers,
    };
    progress.report(true, || {
        format!(
            "...building documents (done) - courses:{} lessons:{} orders:{} participants:{}",
            catalog.courses.len(),
            catalog.lesson_count(),
            catalog.orders.len(),
            catalog.participant_count(),
        )
    });
    catalog
}

/// Step 1: file id -> storage path.
fn index_files(arena: &TableArena, progress: &mut ProgressReporter) -> EntityIndex {
    let mut files = EntityIndex::new();
    for row in arena.rows("file_managed") {
        let Some(fid) = row.key("fid") else { continue };
        files.insert(fid, row.json("uri"));
        progress.report(false, || {
            format!("...building documents (files) - files:{}", files.len())
        });
    }
    files
}

/// Step 2: user id -> user document, with roles and picture attached.
fn index_users(
    arena: &TableArena,
    files: &EntityIndex,
    progress: &mut ProgressReporter,
) -> EntityIndex {
    let mut users = EntityIndex::new();
    for row in arena.rows("users_field_data") {
        let Some(uid) = row.key("uid") else { continue };
        users.insert(
            uid,
            json!({
                "id": row.json("uid"),
                "name": row.json("name"),
                "mail": row.json("mail"),
                "status": row.json("status"),
                "roles": [],
                "picture": null,
            }),
        );
        progress.report(false, || {
            format!("...building documents (users) - users:{}", users.len())
        });
    }

    for row in arena.rows("user__roles") {
        let Some(uid) = row.key("entity_id") else { continue };
        if let Some(doc) = users.get_mut(&uid) {
            if let Some(roles) = doc.get_mut("roles").and_then(Value::as_array_mut) {
                roles.push(row.json("roles_target_id"));
            }
        }
    }

    for row in arena.rows("user__user_picture") {
        let (Some(uid), Some(fid)) =
            (row.key("entity_id"), row.key("user_picture_target_id"))
        else {
            continue;
        };
        if let Some(uri) = files.get(&fid).cloned() {
            if let Some(doc) = users.get_mut(&uid) {
                doc["picture"] = uri;
            }
        }
    }
    users
}

/// Step 3: taxonomy term id -> display name.
fn index_terms(arena: &TableArena, progress: &mut ProgressReporter) -> EntityIndex {
    let mut terms = EntityIndex::new();
    for row in arena.rows("taxonomy_term_field_data") {
        let Some(tid) = row.key("tid") else { continue };
        terms.insert(tid, row.json("name"));
        progress.report(false, || {
            format!("...building documents (taxonomy) - terms:{}", terms.len())
        });
    }
    terms
}

/// Step 4: variation id -> lesson document (dates, location, teachers),
/// plus the grouping of variation ids under their parent course.
fn index_variations(
    arena: &TableArena,
    terms: &EntityIndex,
    users: &EntityIndex,
    progress: &mut ProgressReporter,
) -> (EntityIndex, HashMap<JoinKey, Vec<JoinKey>>) {
    let mut variations = EntityIndex::new();
    let mut by_course: HashMap<JoinKey, Vec<JoinKey>> = HashMap::new();

    for row in arena.rows("commerce_product_variation_field_data") {
        let Some(vid) = row.key("variation_id") else { continue };
        variations.insert(
            vid.clone(),
            json!({
                "id": row.json("variation_id"),
                "sku": row.json("sku"),
                "title": row.json("title"),
                "status": row.json("status"),
            }),
        );
        if let Some(pid) = row.key("product_id") {
            by_course.entry(pid).or_default().push(vid);
        }
        progress.report(false, || {
            format!(
                "...building documents (lessons) - lessons:{}",
                variations.len()
            )
        });
    }

    // Zero-to-many dates, in source row order. The key appears only when
    // at least one date row exists.
    for row in arena.rows("commerce_product_variation__field_lesson_dates") {
        let Some(vid) = row.key("entity_id") else { continue };
        if let Some(obj) = variations.get_mut(&vid).and_then(Value::as_object_mut) {
            let dates = obj.entry("dates").or_insert_with(|| json!([]));
            if let Some(arr) = dates.as_array_mut() {
                arr.push(json!({
                    "start": row.json("field_lesson_dates_value"),
                    "end": row.json("field_lesson_dates_end_value"),
                }));
            }
        }
    }

    // Location resolves through the taxonomy index; a missing term leaves
    // the raw target id in place.
    for row in arena.rows("commerce_product_variation__field_location_ref") {
        let Some(vid) = row.key("entity_id") else { continue };
        let resolved = row
            .key("field_location_ref_target_id")
            .and_then(|tid| terms.get(&tid).cloned())
            .unwrap_or_else(|| row.json("field_location_ref_target_id"));
        if let Some(doc) = variations.get_mut(&vid) {
            doc["location"] = resolved;
        }
    }

    // Teachers embed the full user document; unknown users are skipped.
    for row in arena.rows("commerce_product_variation__field_teachers") {
        let (Some(vid), Some(uid)) =
            (row.key("entity_id"), row.key("field_teachers_target_id"))
        else {
            continue;
        };
        let Some(user) = users.get(&uid).cloned() else { continue };
        if let Some(obj) = variations.get_mut(&vid).and_then(Value::as_object_mut) {
            let teachers = obj.entry("teachers").or_insert_with(|| json!([]));
            if let Some(arr) = teachers.as_array_mut() {
                arr.push(user);
            }
        }
    }

    (variations, by_course)
}

/// Step 5: order documents with embedded line items; each resolved lesson
/// gains an inferred attendee entry for the order's owner.
fn build_orders(
    arena: &TableArena,
    users: &EntityIndex,
    variations: &mut EntityIndex,
    progress: &mut ProgressReporter,
) -> Vec<Value> {
    let mut orders = EntityIndex::new();
    for row in arena.rows("commerce_order") {
        let Some(oid) = row.key("order_id") else { continue };
        let owner = row
            .key("uid")
            .and_then(|uid| users.get(&uid).cloned())
            .unwrap_or(Value::Null);
        orders.insert(
            oid,
            json!({
                "id": row.json("order_id"),
                "order_number": row.json("order_number"),
                "mail": row.json("mail"),
                "state": row.json("state"),
                "total_price": row.json("total_price__number"),
                "currency": row.json("total_price__currency_code"),
                "owner": owner,
                "items": [],
            }),
        );
        progress.report(false, || {
            format!("...building documents (orders) - orders:{}", orders.len())
        });
    }

    let mut participants = 0usize;
    for (idx, row) in arena.rows("commerce_order_item").iter().enumerate() {
        let Some(oid) = row.key("order_id") else { continue };
        let vid = row.key("purchased_entity");

        // A purchased entity that matches no known lesson still yields a
        // line item; the title degrades to "Unknown".
        let title = match vid.as_ref().and_then(|k| variations.get(k)) {
            Some(doc) => doc.get("title").cloned().unwrap_or(Value::Null),
            None => json!("Unknown"),
        };
        let item = json!({
            "id": row.json("order_item_id"),
            "type": row.json("type"),
            "quantity": row.json("quantity"),
            "unit_price": row.json("unit_price__number"),
            "total_price": row.json("total_price__number"),
            "product_variation_id": row.json("purchased_entity"),
            "product_title": title,
        });

        let Some(order) = orders.get_mut(&oid) else { continue };
        let attendee = match order.get("owner") {
            Some(owner) if !owner.is_null() => Some(json!({
                "name": owner.get("name").cloned().unwrap_or(Value::Null),
                "mail": owner.get("mail").cloned().unwrap_or(Value::Null),
                "order_id": row.json("order_id"),
            })),
            _ => None,
        };
        if let Some(items) = order.get_mut("items").and_then(Value::as_array_mut) {
            items.push(item);
        }

        if let (Some(vid), Some(attendee)) = (vid, attendee) {
            if let Some(obj) = variations.get_mut(&vid).and_then(Value::as_object_mut) {
                let attendees = obj.entry("attendees").or_insert_with(|| json!([]));
                if let Some(arr) = attendees.as_array_mut() {
                    arr.push(attendee);
                    participants += 1;
                }
            }
        }

        progress.report(false, || {
            format!(
                "...building documents (participants) - items:{} participants:{}",
                idx + 1,
                participants
            )
        });
    }

    orders.values().cloned().collect()
}

/// Step 6: course documents from product rows, embedding the finished
/// lesson documents and resolving the description/program/image/category
/// side-tables.
fn build_courses(
    arena: &TableArena,
    files: &EntityIndex,
    terms: &EntityIndex,
    variations: &EntityIndex,
    lessons_by_course: &HashMap<JoinKey, Vec<JoinKey>>,
    progress: &mut ProgressReporter,
) -> Vec<Value> {
    let mut courses = EntityIndex::new();
    for row in arena.rows("commerce_product_field_data") {
        let Some(pid) = row.key("product_id") else { continue };
        let lessons: Vec<Value> = lessons_by_course
            .get(&pid)
            .map(|vids| {
                vids.iter()
                    .filter_map(|vid| variations.get(vid).cloned())
                    .collect()
            })
            .unwrap_or_default();
        courses.insert(
            pid,
            json!({
                "id": row.json("product_id"),
                "title": row.json("title"),
                "type": row.json("type"),
                "status": row.json("status"),
                "created": row.json("created"),
                "description": null,
                "program": null,
                "image": null,
                "category": null,
                "lessons": lessons,
            }),
        );
        progress.report(false, || {
            format!("...building documents (courses) - courses:{}", courses.len())
        });
    }

    // Description and program hold embedded markup; it is carried
    // verbatim, never escaped or stripped.
    for row in arena.rows("commerce_product__field_course_desc") {
        let Some(pid) = row.key("entity_id") else { continue };
        if let Some(doc) = courses.get_mut(&pid) {
            doc["description"] = row.json("field_course_desc_value");
        }
    }
    for row in arena.rows("commerce_product__field_course_program") {
        let Some(pid) = row.key("entity_id") else { continue };
        if let Some(doc) = courses.get_mut(&pid) {
            doc["program"] = row.json("field_course_program_value");
        }
    }

    for row in arena.rows("commerce_product__field_course_img") {
        let Some(pid) = row.key("entity_id") else { continue };
        if let Some(doc) = courses.get_mut(&pid) {
            doc["image_id"] = row.json("field_course_img_target_id");
            doc["image"] = row
                .key("field_course_img_target_id")
                .and_then(|fid| files.get(&fid).cloned())
                .unwrap_or(Value::Null);
        }
    }

    for row in arena.rows("commerce_product__field_course_category") {
        let Some(pid) = row.key("entity_id") else { continue };
        let resolved = row
            .key("field_course_category_target_id")
            .and_then(|tid| terms.get(&tid).cloned())
            .unwrap_or_else(|| row.json("field_course_category_target_id"));
        if let Some(doc) = courses.get_mut(&pid) {
            doc["category"] = resolved;
        }
    }

    courses.values().cloned().collect()
}

/// Step 7: the flat instructor list - users tagged with the instructor
/// role, plus any user directly referenced as a lesson teacher even
/// without the tag, in user insertion order.
fn derive_teachers(users: &EntityIndex, variations: &EntityIndex) -> Vec<Value> {
    let mut referenced: HashSet<JoinKey> = HashSet::new();
    for doc in variations.values() {
        if let Some(teachers) = doc.get("teachers").and_then(Value::as_array) {
            for teacher in teachers {
                if let Some(key) = teacher.get("id").and_then(json_join_key) {
                    referenced.insert(key);
                }
            }
        }
    }

    users
        .iter()
        .filter(|(key, doc)| {
            let has_role = doc
                .get("roles")
                .and_then(Value::as_array)
                .map(|roles| roles.iter().any(|r| r.as_str() == Some(INSTRUCTOR_ROLE)))
                .unwrap_or(false);
            has_role || referenced.contains(*key)
        })
        .map(|(_, doc)| doc.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::scanner::DumpScanner;
    use std::io::Cursor;

    fn catalog_from(dump: &str) -> Catalog {
        let arena = DumpScanner::new()
            .scan(Cursor::new(dump), &mut ProgressReporter::disabled())
            .unwrap();
        rebuild(&arena, &mut ProgressReporter::disabled())
    }

    #[test]
    fn test_two_date_rows_in_source_order() {
        let dump = concat!(
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_variation__field_lesson_dates` (`entity_id`, `field_lesson_dates_value`, `field_lesson_dates_end_value`) VALUES (10,'2026-01-01T09:00','2026-01-01T12:00'),(10,'2026-01-08T09:00','2026-01-08T12:00');\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
        );
        let catalog = catalog_from(dump);
        let lesson = &catalog.courses[0]["lessons"][0];
        let dates = lesson["dates"].as_array().unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0]["start"], "2026-01-01T09:00");
        assert_eq!(dates[1]["start"], "2026-01-08T09:00");
    }

    #[test]
    fn test_lesson_without_side_rows_has_no_optional_keys() {
        let dump = concat!(
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
        );
        let catalog = catalog_from(dump);
        let lesson = &catalog.courses[0]["lessons"][0];
        assert!(lesson.get("dates").is_none());
        assert!(lesson.get("teachers").is_none());
        assert!(lesson.get("attendees").is_none());
        assert!(lesson.get("location").is_none());
    }

    #[test]
    fn test_dangling_purchased_entity_yields_unknown_title() {
        let dump = concat!(
            "INSERT INTO `commerce_order` (`order_id`, `order_number`, `uid`, `mail`, `state`, `total_price__number`, `total_price__currency_code`) VALUES (100,'100','5','x@y.z','completed','50.00','EUR');\n",
            "INSERT INTO `commerce_order_item` (`order_item_id`, `order_id`, `type`, `purchased_entity`, `quantity`, `unit_price__number`, `total_price__number`) VALUES (200,100,'default',999,'1.00','50.00','50.00');\n",
        );
        let catalog = catalog_from(dump);
        assert_eq!(catalog.orders.len(), 1);
        let item = &catalog.orders[0]["items"][0];
        assert_eq!(item["product_title"], "Unknown");
        assert_eq!(item["product_variation_id"], 999);
    }

    #[test]
    fn test_attendee_inferred_from_order_owner() {
        let dump = concat!(
            "INSERT INTO `users_field_data` (`uid`, `name`, `mail`, `status`) VALUES (5,'Carol','carol@example.com',1);\n",
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
            "INSERT INTO `commerce_order` (`order_id`, `order_number`, `uid`, `mail`, `state`, `total_price__number`, `total_price__currency_code`) VALUES (100,'100',5,'carol@example.com','completed','50.00','EUR');\n",
            "INSERT INTO `commerce_order_item` (`order_item_id`, `order_id`, `type`, `purchased_entity`, `quantity`, `unit_price__number`, `total_price__number`) VALUES (200,100,'default',10,'1.00','50.00','50.00');\n",
        );
        let catalog = catalog_from(dump);
        let lesson = &catalog.courses[0]["lessons"][0];
        let attendees = lesson["attendees"].as_array().unwrap();
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0]["name"], "Carol");
        assert_eq!(attendees[0]["mail"], "carol@example.com");
        assert_eq!(attendees[0]["order_id"], 100);
        assert_eq!(catalog.participant_count(), 1);
        // The order line item resolved the lesson title
        assert_eq!(catalog.orders[0]["items"][0]["product_title"], "Lesson A");
    }

    #[test]
    fn test_missing_taxonomy_term_falls_back_to_raw_id() {
        let dump = concat!(
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_variation__field_location_ref` (`entity_id`, `field_location_ref_target_id`) VALUES (10,77);\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
        );
        let catalog = catalog_from(dump);
        assert_eq!(catalog.courses[0]["lessons"][0]["location"], 77);
    }

    #[test]
    fn test_location_resolves_through_taxonomy() {
        let dump = concat!(
            "INSERT INTO `taxonomy_term_field_data` (`tid`, `name`) VALUES (77,'Ghent');\n",
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_variation__field_location_ref` (`entity_id`, `field_location_ref_target_id`) VALUES (10,77);\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
        );
        let catalog = catalog_from(dump);
        assert_eq!(catalog.courses[0]["lessons"][0]["location"], "Ghent");
    }

    #[test]
    fn test_teacher_list_unions_role_and_reference() {
        let dump = concat!(
            "INSERT INTO `users_field_data` (`uid`, `name`, `mail`, `status`) VALUES (1,'Role Only','r@example.com',1),(2,'Referenced Only','t@example.com',1),(3,'Neither','n@example.com',1);\n",
            "INSERT INTO `user__roles` (`entity_id`, `roles_target_id`) VALUES (1,'lesgever');\n",
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_variation__field_teachers` (`entity_id`, `field_teachers_target_id`) VALUES (10,2);\n",
        );
        let catalog = catalog_from(dump);
        let names: Vec<&str> = catalog
            .teachers
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Role Only", "Referenced Only"]);
    }

    #[test]
    fn test_user_picture_resolved_via_file_index() {
        let dump = concat!(
            "INSERT INTO `file_managed` (`fid`, `uri`) VALUES (3,'public://ann.jpg');\n",
            "INSERT INTO `users_field_data` (`uid`, `name`, `mail`, `status`) VALUES (1,'Ann','ann@example.com',1);\n",
            "INSERT INTO `user__user_picture` (`entity_id`, `user_picture_target_id`) VALUES (1,3),(1,99);\n",
        );
        let arena = DumpScanner::new()
            .scan(Cursor::new(dump), &mut ProgressReporter::disabled())
            .unwrap();
        let files = index_files(&arena, &mut ProgressReporter::disabled());
        let users = index_users(&arena, &files, &mut ProgressReporter::disabled());
        let ann = users.get(&JoinKey::Integer(1)).unwrap();
        // The dangling fid 99 row did not clobber the resolved picture
        assert_eq!(ann["picture"], "public://ann.jpg");
    }

    #[test]
    fn test_course_side_fields() {
        let dump = concat!(
            "INSERT INTO `file_managed` (`fid`, `uri`) VALUES (3,'public://course.jpg');\n",
            "INSERT INTO `taxonomy_term_field_data` (`tid`, `name`) VALUES (8,'Surgery');\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
            "INSERT INTO `commerce_product__field_course_desc` (`entity_id`, `field_course_desc_value`) VALUES (1,'<p>Desc &amp; more</p>');\n",
            "INSERT INTO `commerce_product__field_course_program` (`entity_id`, `field_course_program_value`) VALUES (1,'<ul><li>Day 1</li></ul>');\n",
            "INSERT INTO `commerce_product__field_course_img` (`entity_id`, `field_course_img_target_id`) VALUES (1,3);\n",
            "INSERT INTO `commerce_product__field_course_category` (`entity_id`, `field_course_category_target_id`) VALUES (1,8);\n",
        );
        let catalog = catalog_from(dump);
        let course = &catalog.courses[0];
        // Markup carried verbatim
        assert_eq!(course["description"], "<p>Desc &amp; more</p>");
        assert_eq!(course["program"], "<ul><li>Day 1</li></ul>");
        assert_eq!(course["image"], "public://course.jpg");
        assert_eq!(course["image_id"], 3);
        assert_eq!(course["category"], "Surgery");
    }

    #[test]
    fn test_order_without_known_owner_has_null_owner_and_no_attendee() {
        let dump = concat!(
            "INSERT INTO `commerce_product_variation_field_data` (`variation_id`, `product_id`, `sku`, `title`, `status`) VALUES (10,1,'SKU-A','Lesson A',1);\n",
            "INSERT INTO `commerce_product_field_data` (`product_id`, `title`, `type`, `status`, `created`) VALUES (1,'Course','course',1,1700000000);\n",
            "INSERT INTO `commerce_order` (`order_id`, `order_number`, `uid`, `mail`, `state`, `total_price__number`, `total_price__currency_code`) VALUES (100,'100',42,'ghost@example.com','completed','50.00','EUR');\n",
            "INSERT INTO `commerce_order_item` (`order_item_id`, `order_id`, `type`, `purchased_entity`, `quantity`, `unit_price__number`, `total_price__number`) VALUES (200,100,'default',10,'1.00','50.00','50.00');\n",
        );
        let catalog = catalog_from(dump);
        assert_eq!(catalog.orders[0]["owner"], Value::Null);
        assert_eq!(catalog.orders[0]["items"].as_array().unwrap().len(), 1);
        let lesson = &catalog.courses[0]["lessons"][0];
        assert!(lesson.get("attendees").is_none());
    }
}
