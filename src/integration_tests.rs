// ABOUTME: End-to-end tests against an installed SQLite store
// ABOUTME: Covers installation, the authentication gate, taxonomies, attachments, logs and versions

#[cfg(test)]
mod tests {
    use crate::entities::{self, equipment_category, session};
    use crate::managers::{NewEquipment, NewParameter, NewUser, ParameterValue};
    use crate::{
        seed, Client, ConnectionConfig, Connector, Error, InstallOptions, Installer, RoleName,
    };
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use tempfile::TempDir;

    async fn install_store() -> (Client, ConnectionConfig, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = ConnectionConfig::sqlite(temp_dir.path().join("records.db"));
        let client = Installer::default().install(&config).await.unwrap();
        (client, config, temp_dir)
    }

    async fn admin_client() -> (Client, ConnectionConfig, TempDir) {
        let (mut client, config, temp_dir) = install_store().await;
        client
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();
        (client, config, temp_dir)
    }

    fn scientist(login: &str) -> NewUser {
        NewUser {
            login: login.to_string(),
            password: format!("{}-password", login),
            name_first: "Jane".to_string(),
            name_last: "Doe".to_string(),
            email: format!("{}@lab.example.org", login),
        }
    }

    /// Creates a regular user as administrator, then signs in as that user.
    async fn switch_to_scientist(client: &mut Client, login: &str) {
        let new_user = scientist(login);
        client
            .users
            .create_user(&client.context, &new_user, &[RoleName::User])
            .await
            .unwrap();
        client.sign_out().await.unwrap();
        client.sign_in(login, &new_user.password).await.unwrap();
    }

    #[tokio::test]
    async fn test_connector_from_file_matches_config() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("records.db");
        let config = ConnectionConfig::sqlite(&db_path);

        let config_path = temp_dir.path().join("connection.yaml");
        std::fs::write(
            &config_path,
            format!("backend: sqlite\ndb_name: {}\n", db_path.display()),
        )
        .unwrap();

        let direct = Connector::connect(&config).await.unwrap();
        let from_file = Connector::from_config_file(&config_path).await.unwrap();
        assert_eq!(direct.connection_string(), from_file.connection_string());
    }

    #[tokio::test]
    async fn test_client_needs_installed_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConnectionConfig::sqlite(temp_dir.path().join("empty.db"));

        let result = Client::connect(&config).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_install_seeds_defaults() {
        let (client, _config, _temp_dir) = install_store().await;
        let db = client.db();

        assert_eq!(entities::Role::find().count(db).await.unwrap(), 4);
        assert_eq!(entities::LogCategory::find().count(db).await.unwrap(), 4);
        assert_eq!(
            entities::ParameterType::find().count(db).await.unwrap(),
            seed::DEFAULT_PARAMETER_TYPES.len() as u64
        );
        assert_eq!(entities::User::find().count(db).await.unwrap(), 2);

        let bot = client.context.service_account().unwrap();
        assert_eq!(bot.login, seed::SERVICE_ACCOUNT_LOGIN);
        assert!(!client.signed_in());
        assert_eq!(client.context.actor().unwrap().login, seed::SERVICE_ACCOUNT_LOGIN);

        // The installer signed out again.
        let open = entities::Session::find()
            .filter(session::Column::EndedAt.is_null())
            .count(db)
            .await
            .unwrap();
        assert_eq!(open, 0);
    }

    #[tokio::test]
    async fn test_install_twice_is_idempotent() {
        let (client, config, _temp_dir) = install_store().await;
        client.close().await.unwrap();

        let mut again = Installer::new(InstallOptions {
            administrator_password: "a different password".to_string(),
            ..InstallOptions::default()
        })
        .install(&config)
        .await
        .unwrap();
        let db = again.db().clone();

        assert_eq!(entities::Role::find().count(&db).await.unwrap(), 4);
        assert_eq!(entities::LogCategory::find().count(&db).await.unwrap(), 4);
        assert_eq!(entities::User::find().count(&db).await.unwrap(), 2);
        assert_eq!(
            entities::ParameterType::find().count(&db).await.unwrap(),
            seed::DEFAULT_PARAMETER_TYPES.len() as u64
        );

        again
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();
        assert!(again.check_if_user_is_administrator().await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_starts_from_empty_store() {
        let (client, config, _temp_dir) = admin_client().await;
        client
            .equipment
            .create_equipment_category(&client.context, "Lasers", None, None)
            .await
            .unwrap();
        client.close().await.unwrap();

        let fresh = Installer::new(InstallOptions {
            overwrite: true,
            ..InstallOptions::default()
        })
        .install(&config)
        .await
        .unwrap();

        let db = fresh.db();
        assert_eq!(entities::EquipmentCategory::find().count(db).await.unwrap(), 0);
        assert_eq!(entities::Role::find().count(db).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let (mut client, _config, _temp_dir) = install_store().await;

        let opened = client
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();
        assert!(client.signed_in());
        let user = client.context.user().unwrap().clone();
        assert_eq!(user.login, seed::ADMINISTRATOR_LOGIN);
        assert_eq!(opened.user_id, user.id);
        assert_eq!(client.users.current_session(&client.context), Some(&opened));
        assert!(client.check_if_user_is_administrator().await.unwrap());

        client.sign_out().await.unwrap();
        assert!(!client.signed_in());
        assert!(client.context.session().is_none());
        assert!(client.context.user().is_none());
        assert!(!client.check_if_user_is_administrator().await.unwrap());

        let closed = entities::Session::find_by_id(opened.id)
            .one(client.db())
            .await
            .unwrap()
            .unwrap();
        assert!(closed.ended_at.is_some());

        // Signing out twice is harmless.
        client.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_credentials_leave_state_unchanged() {
        let (mut client, _config, _temp_dir) = install_store().await;

        let wrong_password = client.sign_in(seed::ADMINISTRATOR_LOGIN, "not-it").await;
        assert!(matches!(wrong_password, Err(Error::Authentication(_))));
        assert!(!client.signed_in());

        let unknown = client.sign_in("nobody", "whatever").await;
        assert!(matches!(unknown, Err(Error::Authentication(_))));
        assert!(!client.signed_in());
        assert!(client.context.user().is_none());
    }

    #[tokio::test]
    async fn test_second_sign_in() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        client
            .users
            .create_user(&client.context, &scientist("jane"), &[RoleName::User])
            .await
            .unwrap();
        let first = client.context.session().unwrap().clone();

        let same = client
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();
        assert_eq!(same.id, first.id);

        let other = client.sign_in("jane", "jane-password").await;
        assert!(matches!(other, Err(Error::AlreadySignedIn(_))));
        assert_eq!(
            client.context.user().unwrap().login,
            seed::ADMINISTRATOR_LOGIN
        );
    }

    #[tokio::test]
    async fn test_new_sign_in_closes_stale_session() {
        let (client, config, _temp_dir) = admin_client().await;
        let stale = client.context.session().unwrap().clone();

        // A second client for the same user, while the first never signed out.
        let mut second = Client::connect(&config).await.unwrap();
        second
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();

        let reloaded = entities::Session::find_by_id(stale.id)
            .one(second.db())
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_signed_out_mutations_are_rejected() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        let project = client
            .projects
            .create_project(&client.context, "Raman", None)
            .await
            .unwrap();
        client.sign_out().await.unwrap();

        let db = client.db().clone();
        let logs_before = entities::Log::find().count(&db).await.unwrap();

        let category = client
            .equipment
            .create_equipment_category(&client.context, "Lasers", None, None)
            .await;
        assert!(matches!(category, Err(Error::NotAuthenticated)));

        let created = client
            .projects
            .create_project(&client.context, "Other", None)
            .await;
        assert!(matches!(created, Err(Error::NotAuthenticated)));

        let logged = client
            .logs
            .record(&client.context, seed::INFORMATION, "hello")
            .await;
        assert!(matches!(logged, Err(Error::NotAuthenticated)));

        let versioned = client
            .versions
            .set_version(&client.context, project.id, "1.0")
            .await;
        assert!(matches!(versioned, Err(Error::NotAuthenticated)));

        assert_eq!(entities::EquipmentCategory::find().count(&db).await.unwrap(), 0);
        assert_eq!(entities::Project::find().count(&db).await.unwrap(), 1);
        assert_eq!(entities::ProjectVersion::find().count(&db).await.unwrap(), 0);
        assert_eq!(entities::Log::find().count(&db).await.unwrap(), logs_before);
    }

    #[tokio::test]
    async fn test_regular_user_cannot_administer() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        switch_to_scientist(&mut client, "jane").await;

        assert!(!client.check_if_user_is_administrator().await.unwrap());

        let manufacturer = client
            .equipment
            .create_manufacturer(&client.context, "Thorlabs Inc.", "Thorlabs", None)
            .await;
        assert!(matches!(manufacturer, Err(Error::Authorization { .. })));

        let parameter_type = client
            .parameters
            .create_parameter_type(&client.context, "Matrix", None)
            .await;
        assert!(matches!(parameter_type, Err(Error::Authorization { .. })));

        let new_user = client
            .users
            .create_user(&client.context, &scientist("joe"), &[RoleName::User])
            .await;
        assert!(matches!(new_user, Err(Error::Authorization { .. })));

        // Taxonomy nodes only need a signed-in user.
        client
            .equipment
            .create_equipment_category(&client.context, "Detectors", None, None)
            .await
            .unwrap();
        assert_eq!(
            client.users.roles(&client.context, "jane").await.unwrap(),
            vec!["user".to_string()]
        );
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_sign_in() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        client
            .users
            .create_user(&client.context, &scientist("jane"), &[RoleName::User])
            .await
            .unwrap();
        client
            .users
            .set_user_active(&client.context, "jane", false)
            .await
            .unwrap();
        client.sign_out().await.unwrap();

        let result = client.sign_in("jane", "jane-password").await;
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn test_duplicate_category_is_rejected() {
        let (client, _config, _temp_dir) = admin_client().await;
        let equipment = &client.equipment;

        let lasers = equipment
            .create_equipment_category(&client.context, "Lasers", Some("Light sources"), None)
            .await
            .unwrap();
        let again = equipment
            .create_equipment_category(&client.context, "Lasers", None, None)
            .await;
        assert!(matches!(again, Err(Error::DuplicateName { .. })));

        // The same name is fine under another parent.
        equipment
            .create_equipment_category(&client.context, "Lasers", None, Some(lasers.id))
            .await
            .unwrap();

        let roots = entities::EquipmentCategory::find()
            .filter(equipment_category::Column::Name.eq("Lasers"))
            .filter(equipment_category::Column::ParentId.is_null())
            .count(client.db())
            .await
            .unwrap();
        assert_eq!(roots, 1);
    }

    #[tokio::test]
    async fn test_category_tree_and_cycles() {
        let (client, _config, _temp_dir) = admin_client().await;
        let equipment = &client.equipment;
        let context = &client.context;

        let a = equipment
            .create_equipment_category(context, "A", None, None)
            .await
            .unwrap();
        let b = equipment
            .create_equipment_category(context, "B", None, Some(a.id))
            .await
            .unwrap();
        let c = equipment
            .create_equipment_category(context, "C", None, Some(b.id))
            .await
            .unwrap();

        let forest = equipment
            .get_equipment_categories_tree(context, None)
            .await
            .unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "A");
        assert!(forest[0].child("B").unwrap().child("C").is_some());
        assert_eq!(forest[0].count(), 3);

        let cycle = equipment
            .move_equipment_category(context, a.id, Some(c.id))
            .await;
        assert!(matches!(cycle, Err(Error::Cycle { .. })));
        let unchanged = equipment
            .get_equipment_categories_tree(context, None)
            .await
            .unwrap();
        assert_eq!(unchanged, forest);

        let moved = equipment
            .move_equipment_category(context, c.id, None)
            .await
            .unwrap();
        assert_eq!(moved.parent_id, None);
        let forest = equipment
            .get_equipment_categories_tree(context, None)
            .await
            .unwrap();
        assert_eq!(forest.len(), 2);

        let subtree = equipment
            .get_equipment_categories_tree(context, Some(b.id))
            .await
            .unwrap();
        assert_eq!(subtree[0].count(), 1);
    }

    #[tokio::test]
    async fn test_measurement_types() {
        let (client, _config, _temp_dir) = admin_client().await;
        let equipment = &client.equipment;
        let context = &client.context;

        let spectroscopy = equipment
            .create_measurement_type(context, "Spectroscopy", None, None)
            .await
            .unwrap();
        let raman = equipment
            .create_measurement_type(context, "Raman", None, Some(spectroscopy.id))
            .await
            .unwrap();

        let duplicate = equipment
            .create_measurement_type(context, "Raman", None, None)
            .await;
        assert!(matches!(duplicate, Err(Error::DuplicateName { .. })));

        let cycle = equipment
            .move_measurement_type(context, spectroscopy.id, Some(raman.id))
            .await;
        assert!(matches!(cycle, Err(Error::Cycle { .. })));

        let forest = equipment
            .get_measurement_types_tree(context, None)
            .await
            .unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].count(), 2);
    }

    #[tokio::test]
    async fn test_attachments_are_idempotent() {
        let (client, _config, _temp_dir) = admin_client().await;
        let context = &client.context;

        let laser = client
            .equipment
            .create_equipment(
                context,
                &NewEquipment {
                    name: "Ti:Sapphire laser".to_string(),
                    serial_number: "TS-0042".to_string(),
                    ..NewEquipment::default()
                },
            )
            .await
            .unwrap();
        let wavelength = client
            .parameters
            .create_parameter(
                context,
                &NewParameter {
                    name: "Wavelength".to_string(),
                    type_name: seed::NUMERIC_RANGE.to_string(),
                    value: ParameterValue::Range {
                        start: 700.0,
                        stop: 1000.0,
                    },
                    unit: Some("nm".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert!(client
            .equipment
            .attach_parameter(context, laser.id, wavelength.id)
            .await
            .unwrap());
        assert!(!client
            .equipment
            .attach_parameter(context, laser.id, wavelength.id)
            .await
            .unwrap());
        assert_eq!(
            entities::EquipmentParameter::find()
                .count(client.db())
                .await
                .unwrap(),
            1
        );

        let attached = client
            .equipment
            .equipment_parameters(context, laser.id)
            .await
            .unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(
            client
                .parameters
                .get_range_parameter_value(&attached[0])
                .unwrap(),
            Some((700.0, 1000.0))
        );

        let spectroscopy = client
            .equipment
            .create_measurement_type(context, "Spectroscopy", None, None)
            .await
            .unwrap();
        assert!(client
            .equipment
            .attach_measurement_type(context, laser.id, spectroscopy.id)
            .await
            .unwrap());
        assert!(!client
            .equipment
            .attach_measurement_type(context, laser.id, spectroscopy.id)
            .await
            .unwrap());

        let setup = client
            .equipment
            .create_assembly(context, "Pump-probe setup", None)
            .await
            .unwrap();
        assert!(client
            .equipment
            .attach_part(context, setup.id, laser.id)
            .await
            .unwrap());
        assert!(!client
            .equipment
            .attach_part(context, setup.id, laser.id)
            .await
            .unwrap());
        let parts = client
            .equipment
            .assembly_parts(context, setup.id)
            .await
            .unwrap();
        assert_eq!(parts, vec![laser]);
    }

    #[tokio::test]
    async fn test_equipment_references_must_exist() {
        let (client, _config, _temp_dir) = admin_client().await;

        let result = client
            .equipment
            .create_equipment(
                &client.context,
                &NewEquipment {
                    name: "Detector".to_string(),
                    serial_number: "D-1".to_string(),
                    category_id: Some(uuid::Uuid::new_v4()),
                    ..NewEquipment::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let unknown_type = client
            .parameters
            .create_parameter(
                &client.context,
                &NewParameter {
                    name: "Gain".to_string(),
                    type_name: "Tensor".to_string(),
                    value: ParameterValue::Numeric { value: 2.0 },
                    unit: None,
                    description: None,
                },
            )
            .await;
        assert!(matches!(unknown_type, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_category_cascades() {
        let (client, _config, _temp_dir) = admin_client().await;
        let context = &client.context;
        let db = client.db();

        let optics = client
            .equipment
            .create_equipment_category(context, "Optics", None, None)
            .await
            .unwrap();
        let mirrors = client
            .equipment
            .create_equipment_category(context, "Mirrors", None, Some(optics.id))
            .await
            .unwrap();
        let keep = client
            .equipment
            .create_equipment_category(context, "Electronics", None, None)
            .await
            .unwrap();
        let mirror = client
            .equipment
            .create_equipment(
                context,
                &NewEquipment {
                    name: "Dielectric mirror".to_string(),
                    serial_number: "M-7".to_string(),
                    category_id: Some(mirrors.id),
                    ..NewEquipment::default()
                },
            )
            .await
            .unwrap();
        let reflectivity = client
            .parameters
            .create_parameter(
                context,
                &NewParameter {
                    name: "Reflectivity".to_string(),
                    type_name: seed::NUMERIC_VALUE.to_string(),
                    value: ParameterValue::Numeric { value: 0.99 },
                    unit: None,
                    description: None,
                },
            )
            .await
            .unwrap();
        client
            .equipment
            .attach_parameter(context, mirror.id, reflectivity.id)
            .await
            .unwrap();

        let removed = client
            .equipment
            .delete_equipment_category(context, optics.id)
            .await
            .unwrap();
        assert_eq!(removed, 2);

        assert_eq!(entities::EquipmentCategory::find().count(db).await.unwrap(), 1);
        assert!(entities::EquipmentCategory::find_by_id(keep.id)
            .one(db)
            .await
            .unwrap()
            .is_some());
        assert_eq!(entities::Equipment::find().count(db).await.unwrap(), 0);
        assert_eq!(entities::EquipmentParameter::find().count(db).await.unwrap(), 0);
        assert_eq!(entities::Parameter::find().count(db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_category_requires_administrator() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        let optics = client
            .equipment
            .create_equipment_category(&client.context, "Optics", None, None)
            .await
            .unwrap();
        switch_to_scientist(&mut client, "jane").await;

        let result = client
            .equipment
            .delete_equipment_category(&client.context, optics.id)
            .await;
        assert!(matches!(result, Err(Error::Authorization { .. })));
        assert_eq!(
            entities::EquipmentCategory::find()
                .count(client.db())
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_unknown_log_category() {
        let (client, _config, _temp_dir) = admin_client().await;

        let result = client
            .logs
            .record(&client.context, "Trace", "nothing to see")
            .await;
        assert!(matches!(result, Err(Error::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_logs_follow_session_and_project() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        let session_id = client.context.session().unwrap().id;

        let project = client
            .projects
            .create_project(&client.context, "Raman", Some("Raman maps"))
            .await
            .unwrap();
        client
            .projects
            .open_project(&mut client.context, project.id)
            .await
            .unwrap();
        let entry = client
            .logs
            .record(&client.context, seed::WARNING, "Detector saturated")
            .await
            .unwrap();
        assert_eq!(entry.project_id, Some(project.id));
        assert_eq!(entry.session_id, session_id);

        client.projects.close_project(&mut client.context);
        assert!(client.context.project().is_none());

        let project_logs = client
            .logs
            .project_logs(&client.context, project.id)
            .await
            .unwrap();
        assert_eq!(project_logs.len(), 1);
        assert_eq!(project_logs[0].record, "Detector saturated");

        // The sign-in itself was audited in this session.
        let session_logs = client
            .logs
            .session_logs(&client.context, session_id)
            .await
            .unwrap();
        assert!(session_logs.iter().any(|log| log.record.contains("signed in")));
        assert!(session_logs.len() >= 2);
    }

    #[tokio::test]
    async fn test_version_last_write_wins() {
        let (client, _config, _temp_dir) = admin_client().await;
        let project = client
            .projects
            .create_project(&client.context, "Raman", None)
            .await
            .unwrap();

        assert_eq!(
            client
                .versions
                .get_version(&client.context, project.id)
                .await
                .unwrap(),
            None
        );
        client
            .versions
            .set_version(&client.context, project.id, "1.0")
            .await
            .unwrap();
        client
            .versions
            .set_version(&client.context, project.id, "1.1")
            .await
            .unwrap();

        assert_eq!(
            client
                .versions
                .get_version(&client.context, project.id)
                .await
                .unwrap(),
            Some("1.1".to_string())
        );
        assert_eq!(
            entities::ProjectVersion::find()
                .count(client.db())
                .await
                .unwrap(),
            1
        );

        let missing = client
            .versions
            .set_version(&client.context, uuid::Uuid::new_v4(), "2.0")
            .await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sign_out_clears_open_project() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        let project = client
            .projects
            .create_project(&client.context, "Raman", None)
            .await
            .unwrap();
        client
            .projects
            .open_project(&mut client.context, project.id)
            .await
            .unwrap();

        client.sign_out().await.unwrap();
        assert!(client.context.project().is_none());
    }

    #[tokio::test]
    async fn test_close_ends_session() {
        let (client, config, _temp_dir) = admin_client().await;
        let session_id = client.context.session().unwrap().id;
        client.close().await.unwrap();

        let connector = Connector::connect(&config).await.unwrap();
        let closed = entities::Session::find_by_id(session_id)
            .one(connector.db())
            .await
            .unwrap()
            .unwrap();
        assert!(closed.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_session_closed_by_newer_sign_in_cannot_write() {
        let (mut first, config, _temp_dir) = admin_client().await;
        let mut second = Client::connect(&config).await.unwrap();
        second
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();

        let stale = first
            .equipment
            .create_equipment_category(&first.context, "Lasers", None, None)
            .await;
        assert!(matches!(stale, Err(Error::NotAuthenticated)));
        assert_eq!(
            entities::EquipmentCategory::find()
                .count(first.db())
                .await
                .unwrap(),
            0
        );

        // The newer session is the one that works.
        second
            .equipment
            .create_equipment_category(&second.context, "Lasers", None, None)
            .await
            .unwrap();

        // Signing in again replaces the dead session instead of reusing it.
        let stale_id = first.context.session().unwrap().id;
        let renewed = first
            .sign_in(seed::ADMINISTRATOR_LOGIN, seed::DEFAULT_ADMINISTRATOR_PASSWORD)
            .await
            .unwrap();
        assert_ne!(renewed.id, stale_id);
        first
            .projects
            .create_project(&first.context, "Raman", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_deactivated_user_loses_access() {
        let (mut admin, config, _temp_dir) = admin_client().await;
        let jane = scientist("jane");
        admin
            .users
            .create_user(&admin.context, &jane, &[RoleName::User])
            .await
            .unwrap();

        let mut other = Client::connect(&config).await.unwrap();
        other.sign_in("jane", &jane.password).await.unwrap();
        other
            .projects
            .create_project(&other.context, "Before", None)
            .await
            .unwrap();

        admin
            .users
            .set_user_active(&admin.context, "jane", false)
            .await
            .unwrap();
        let after = other
            .projects
            .create_project(&other.context, "After", None)
            .await;
        assert!(matches!(after, Err(Error::NotAuthenticated)));
        assert_eq!(entities::Project::find().count(admin.db()).await.unwrap(), 1);
        admin.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_unstorable_parameter_values_are_rejected() {
        let (client, _config, _temp_dir) = admin_client().await;
        let parameter = |type_name: &str, value: ParameterValue| NewParameter {
            name: "Power".to_string(),
            type_name: type_name.to_string(),
            value,
            unit: Some("mW".to_string()),
            description: None,
        };

        let not_a_number = client
            .parameters
            .create_parameter(
                &client.context,
                &parameter(seed::NUMERIC_VALUE, ParameterValue::Numeric { value: f64::NAN }),
            )
            .await;
        assert!(matches!(not_a_number, Err(Error::InvalidValue(_))));

        let backwards = client
            .parameters
            .create_parameter(
                &client.context,
                &parameter(
                    seed::NUMERIC_RANGE,
                    ParameterValue::Range {
                        start: 10.0,
                        stop: 1.0,
                    },
                ),
            )
            .await;
        assert!(matches!(backwards, Err(Error::InvalidValue(_))));

        let wrong_shape = client
            .parameters
            .create_parameter(
                &client.context,
                &parameter(
                    seed::NUMERIC_RANGE,
                    ParameterValue::Text {
                        value: "bright".to_string(),
                    },
                ),
            )
            .await;
        assert!(matches!(wrong_shape, Err(Error::InvalidValue(_))));

        assert_eq!(entities::Parameter::find().count(client.db()).await.unwrap(), 0);

        let generic = client
            .parameters
            .create_parameter(
                &client.context,
                &parameter(
                    seed::GENERIC,
                    ParameterValue::Text {
                        value: "bright".to_string(),
                    },
                ),
            )
            .await
            .unwrap();
        assert_eq!(
            client.parameters.parameter_value(&generic).unwrap(),
            ParameterValue::Text {
                value: "bright".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_failures_are_not_reported_as_missing_install() {
        let (client, config, _temp_dir) = install_store().await;
        drop(client);

        let connector = Connector::connect(&config).await.unwrap();
        connector.db().clone().close().await.unwrap();

        let result = Client::from_connector(connector).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_logs_keep_write_order_within_a_second() {
        let (mut client, _config, _temp_dir) = admin_client().await;
        let session_id = client.context.session().unwrap().id;
        let project = client
            .projects
            .create_project(&client.context, "Raman", None)
            .await
            .unwrap();
        client
            .projects
            .open_project(&mut client.context, project.id)
            .await
            .unwrap();

        let written: Vec<String> = (0..8).map(|n| format!("step {}", n)).collect();
        for text in &written {
            client
                .logs
                .record(&client.context, seed::DEBUG, text)
                .await
                .unwrap();
        }

        let read: Vec<String> = client
            .logs
            .project_logs(&client.context, project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|log| log.record)
            .collect();
        assert_eq!(read, written);

        let session_logs = client
            .logs
            .session_logs(&client.context, session_id)
            .await
            .unwrap();
        assert!(session_logs[0].record.contains("signed in"));
        assert!(session_logs
            .windows(2)
            .all(|pair| pair[0].sequence < pair[1].sequence));
    }
}
